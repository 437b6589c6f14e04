//! Run Question Round use case
//!
//! Presents one question, collects answers for a fixed window, then
//! grades the in-memory answer records. The reveal edit (highlight the
//! correct option, disable input, attach a reference) is best-effort:
//! grading is authoritative whether or not the message can still be
//! edited.

use crate::config::SessionParams;
use crate::ports::quiz_ui::{QuestionView, QuizUi, UiError};
use crate::ports::reference_resolver::ReferenceResolver;
use crate::use_cases::window::{WindowHandler, run_event_window};
use quizcord_domain::{AnswerEvent, AnswerSheet, ChannelId, Question, UserId};
use std::sync::Arc;
use tracing::{debug, warn};

impl WindowHandler for AnswerSheet {
    type Event = AnswerEvent;

    fn on_event(&mut self, event: AnswerEvent) {
        self.record(event.voter, event.label);
    }

    fn status_line(&self) -> String {
        format!("{} answered", self.respondent_count())
    }
}

/// Use case for running one question's presentation-to-grading cycle
pub struct RunQuestionRound {
    ui: Arc<dyn QuizUi>,
    reference: Arc<dyn ReferenceResolver>,
    params: SessionParams,
}

impl RunQuestionRound {
    pub fn new(
        ui: Arc<dyn QuizUi>,
        reference: Arc<dyn ReferenceResolver>,
        params: SessionParams,
    ) -> Self {
        Self {
            ui,
            reference,
            params,
        }
    }

    /// Run one answer window and return the correctly-answering voters
    ///
    /// Only the initial render can fail the round; everything after it
    /// works from in-memory records.
    pub async fn execute(
        &self,
        channel: ChannelId,
        question: &Question,
    ) -> Result<Vec<UserId>, UiError> {
        let view = QuestionView {
            index: question.index,
            prompt: question.prompt.clone(),
            answer_labels: {
                let mut rng = rand::thread_rng();
                question.answer_labels(&mut rng)
            },
            seconds: self.params.voting_time.as_secs(),
        };
        let (handle, mut events) = self.ui.render_question(channel, &view).await?;

        let mut sheet = AnswerSheet::new();
        run_event_window(
            self.ui.as_ref(),
            &handle,
            &mut events,
            self.params.voting_time,
            &mut sheet,
        )
        .await;

        // Grade before touching the UI so a failed edit cannot matter
        let correct_voters = sheet.grade(&question.correct_answer);
        debug!(
            index = question.index,
            respondents = sheet.respondent_count(),
            correct = correct_voters.len(),
            "question window closed"
        );

        let learn_more = self.reference.learn_more_url(&question.prompt);
        if let Err(e) = self
            .ui
            .reveal_answer(&handle, question, learn_more.as_deref())
            .await
        {
            warn!("failed to reveal answer for question {}: {e}", question.index);
        }

        Ok(correct_voters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::reference_resolver::NoReference;
    use crate::use_cases::test_support::{RecordingUi, gold_question, short_params};
    use quizcord_domain::AnswerEvent;

    fn answer(voter: u64, label: &str) -> AnswerEvent {
        AnswerEvent {
            voter: UserId(voter),
            label: label.to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_last_submission_wins() {
        let ui = Arc::new(RecordingUi::new());
        ui.queue_answer_rounds(vec![vec![
            answer(1, "Au"),
            answer(1, "Fe"),
            answer(1, "Au"),
            answer(2, "Ag"),
        ]]);

        let round = RunQuestionRound::new(ui, Arc::new(NoReference), short_params());
        let correct = round.execute(ChannelId(1), &gold_question()).await.unwrap();

        assert_eq!(correct, vec![UserId(1)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_failure_does_not_affect_grading() {
        let ui = Arc::new(RecordingUi::failing_reveal());
        ui.queue_answer_rounds(vec![vec![answer(1, "Au"), answer(2, "Au")]]);

        let round = RunQuestionRound::new(ui, Arc::new(NoReference), short_params());
        let mut correct = round.execute(ChannelId(1), &gold_question()).await.unwrap();

        correct.sort_by_key(|u| u.0);
        assert_eq!(correct, vec![UserId(1), UserId(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_answers_grades_empty() {
        let ui = Arc::new(RecordingUi::new());
        let round = RunQuestionRound::new(ui, Arc::new(NoReference), short_params());

        let correct = round.execute(ChannelId(1), &gold_question()).await.unwrap();
        assert!(correct.is_empty());
    }
}
