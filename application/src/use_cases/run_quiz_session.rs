//! Run Quiz Session use case
//!
//! The per-channel session coordinator: admission control, the voting
//! phase, the question loop, score persistence, and the final standings.
//! Collaborators arrive by dependency injection; the coordinator owns all
//! session state for its lifetime.

use crate::config::SessionParams;
use crate::ports::content_provider::{ContentError, ContentProvider};
use crate::ports::quiz_ui::{QuizUi, UiError};
use crate::ports::reference_resolver::{NoReference, ReferenceResolver};
use crate::ports::score_ledger::{LedgerError, ScoreLedger};
use crate::use_cases::run_question_round::RunQuestionRound;
use crate::use_cases::run_voting_phase::{RunVotingPhase, VotingPhaseError};
use quizcord_domain::{
    ChannelId, DomainError, GuildId, ParticipantTally, QuizSession, Standing, TopicPerformance,
    VoteOutcome, select_category,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while running a session
#[derive(Error, Debug)]
pub enum SessionError {
    /// Admission rejected: the channel already hosts a live session.
    /// User-facing and non-fatal — nothing was started.
    #[error("A quiz is already running in this channel")]
    AlreadyActive,

    #[error("Content provider error: {0}")]
    Content(#[from] ContentError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("UI error: {0}")]
    Ui(#[from] UiError),

    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl From<VotingPhaseError> for SessionError {
    fn from(error: VotingPhaseError) -> Self {
        match error {
            VotingPhaseError::Ui(e) => SessionError::Ui(e),
            VotingPhaseError::Domain(e) => SessionError::Domain(e),
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The voting phase was cancelled by majority — an expected terminal
    /// outcome, not an error
    Cancelled,
    Completed { standings: Vec<Standing> },
}

/// Use case for running one full quiz session in a channel
///
/// State machine: `Voting -> Questioning -> {Completed, Cancelled}`.
/// Exactly one non-terminal session may exist per channel; the durable
/// active flag in the ledger enforces that across process restarts.
pub struct RunQuizSession {
    ui: Arc<dyn QuizUi>,
    provider: Arc<dyn ContentProvider>,
    ledger: Arc<dyn ScoreLedger>,
    reference: Arc<dyn ReferenceResolver>,
    params: SessionParams,
}

impl RunQuizSession {
    pub fn new(
        ui: Arc<dyn QuizUi>,
        provider: Arc<dyn ContentProvider>,
        ledger: Arc<dyn ScoreLedger>,
        params: SessionParams,
    ) -> Self {
        Self {
            ui,
            provider,
            ledger,
            reference: Arc::new(NoReference),
            params,
        }
    }

    /// Attach a "learn more" reference resolver
    pub fn with_reference(mut self, reference: Arc<dyn ReferenceResolver>) -> Self {
        self.reference = reference;
        self
    }

    /// Run a session for the channel
    ///
    /// Checks and sets the durable active flag before any other work and
    /// releases it on every exit path — completion, cancellation, and
    /// fatal error alike — before the result propagates.
    pub async fn execute(
        &self,
        channel: ChannelId,
        guild: GuildId,
    ) -> Result<SessionOutcome, SessionError> {
        if self.ledger.is_channel_active(channel).await? {
            return Err(SessionError::AlreadyActive);
        }
        self.ledger.set_channel_active(channel).await?;

        let result = self.run(channel, guild).await;

        if let Err(e) = self.ledger.set_channel_inactive(channel).await {
            warn!(channel = %channel, "failed to release active flag: {e}");
        }
        result
    }

    async fn run(
        &self,
        channel: ChannelId,
        guild: GuildId,
    ) -> Result<SessionOutcome, SessionError> {
        let mut session = QuizSession::start(channel, guild);
        info!(channel = %channel, guild = %guild, "quiz session started");

        let catalog = self.provider.topic_catalog().await?;
        let voting = RunVotingPhase::new(self.ui.clone(), self.params.clone());
        let resolved = match voting.execute(channel, catalog).await? {
            VoteOutcome::Cancelled => {
                session.cancel()?;
                info!(channel = %channel, "session cancelled by vote");
                return Ok(SessionOutcome::Cancelled);
            }
            VoteOutcome::Resolved(resolved) => resolved,
        };
        session.begin_questioning()?;
        info!(
            channel = %channel,
            topic = %resolved.topic.name,
            count = resolved.question_count,
            "questioning phase started"
        );

        let token = self.provider.request_token().await?;
        let round = RunQuestionRound::new(
            self.ui.clone(),
            self.reference.clone(),
            self.params.clone(),
        );

        let mut tally = ParticipantTally::new();
        let mut performance = TopicPerformance::new();

        for index in 1..=resolved.question_count {
            let category = {
                let mut rng = rand::thread_rng();
                select_category(&resolved.topic, &performance, &mut rng)
            }
            .ok_or_else(|| DomainError::TopicHasNoCategories(resolved.topic.name.clone()))?;

            let mut questions = self.provider.fetch_questions(&token, category, 1).await?;
            if questions.is_empty() {
                return Err(ContentError::NoQuestions.into());
            }
            let mut question = questions.remove(0);
            question.index = index;

            let correct_voters = round.execute(channel, &question).await?;
            debug!(
                index,
                category = %category,
                correct = correct_voters.len(),
                "round graded"
            );

            for voter in correct_voters {
                tally.record_correct(voter);
                performance.record_correct(category);

                // The ledger is shared mutable state with no atomic
                // increment, hence read-then-write
                let score = self.ledger.get_score(voter, guild).await?;
                self.ledger.set_score(voter, guild, score + 1).await?;
            }
        }

        session.complete()?;
        let standings = tally.top(self.params.top_n);
        if let Err(e) = self.ui.post_standings(channel, &standings).await {
            warn!(channel = %channel, "failed to post standings: {e}");
        }
        info!(channel = %channel, "quiz session completed");

        Ok(SessionOutcome::Completed { standings })
    }
}
