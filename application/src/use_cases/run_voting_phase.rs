//! Run Voting Phase use case
//!
//! Opens the voting window over the three ballots (topic, question count,
//! cancel) and resolves a `(count, topic)` pair — or a cancellation — once
//! the window expires.

use crate::config::SessionParams;
use crate::ports::quiz_ui::{BallotClose, BallotMenu, QuizUi, UiError};
use crate::use_cases::window::{WindowHandler, run_event_window};
use quizcord_domain::{BallotEvent, ChannelId, DomainError, Topic, VoteOutcome, VotingState};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

impl WindowHandler for VotingState {
    type Event = BallotEvent;

    fn on_event(&mut self, event: BallotEvent) {
        if let Err(e) = self.apply(event) {
            warn!("rejected ballot event: {e}");
        }
    }

    fn status_line(&self) -> String {
        let mut parts: Vec<String> = self
            .topic_tallies()
            .into_iter()
            .chain(self.count_tallies())
            .map(|(label, votes)| format!("{label} {votes}"))
            .collect();
        parts.push(format!(
            "Cancel {}/{}",
            self.cancel_count(),
            self.participant_count()
        ));
        parts.join(" | ")
    }
}

/// Errors that can occur while running a voting phase
#[derive(Error, Debug)]
pub enum VotingPhaseError {
    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

/// Use case for running the voting phase of a session
pub struct RunVotingPhase {
    ui: Arc<dyn QuizUi>,
    params: SessionParams,
}

impl RunVotingPhase {
    pub fn new(ui: Arc<dyn QuizUi>, params: SessionParams) -> Self {
        Self { ui, params }
    }

    /// Run one voting window and resolve it
    ///
    /// The window runs its full fixed duration regardless of how votes
    /// develop; the cancel gate is only inspected at expiry. A failure to
    /// close out the ballot message is logged and ignored — the resolved
    /// outcome stands either way.
    pub async fn execute(
        &self,
        channel: ChannelId,
        catalog: Vec<Topic>,
    ) -> Result<VoteOutcome, VotingPhaseError> {
        let mut state = {
            let mut rng = rand::thread_rng();
            VotingState::new(
                catalog,
                self.params.topic_choices,
                &self.params.count_options,
                &mut rng,
            )?
        };

        let menu = BallotMenu {
            topic_labels: state.topic_labels(),
            count_options: state.count_options(),
            seconds: self.params.voting_time.as_secs(),
        };
        let (handle, mut events) = self.ui.render_ballots(channel, &menu).await?;

        info!(
            channel = %channel,
            "voting window open for {}s",
            self.params.voting_time.as_secs()
        );

        run_event_window(
            self.ui.as_ref(),
            &handle,
            &mut events,
            self.params.voting_time,
            &mut state,
        )
        .await;

        let outcome = {
            let mut rng = rand::thread_rng();
            state.resolve(&mut rng)?
        };

        let close = match &outcome {
            VoteOutcome::Cancelled => BallotClose::Cancelled,
            VoteOutcome::Resolved(resolved) => BallotClose::Resolved {
                winning_topic_label: resolved.winning_label.clone(),
                question_count: resolved.question_count,
            },
        };
        if let Err(e) = self.ui.finish_ballots(&handle, &close).await {
            warn!("failed to close out ballot message: {e}");
        }

        info!(
            channel = %channel,
            participants = state.participant_count(),
            "voting window resolved"
        );
        Ok(outcome)
    }
}
