//! Chat UI port
//!
//! Defines how the core presents ballots and questions and how inbound
//! user actions reach it. Implementations (a chat platform adapter, the
//! console stand-in, test mocks) live outside the application layer; the
//! core never touches rendering toolkits directly.

use async_trait::async_trait;
use quizcord_domain::{AnswerEvent, BallotEvent, ChannelId, Question, Standing};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur at the UI boundary
///
/// Only the initial render of a phase is fatal to a session; edits to an
/// already-rendered message (countdowns, reveals) are logged and ignored
/// because grading works from in-memory records.
#[derive(Error, Debug)]
pub enum UiError {
    #[error("Render failed: {0}")]
    RenderFailed(String),

    #[error("Message can no longer be edited: {0}")]
    EditFailed(String),

    #[error("UI closed")]
    Closed,
}

/// Opaque handle to a message the UI has rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub u64);

/// Handle for receiving user events tied to one rendered message
///
/// Wraps an `mpsc::Receiver`; the adapter translates raw platform
/// interactions into typed events and pushes them here. The stream
/// closing early (message deleted, adapter gone) is not an error — the
/// owning window simply stops seeing new events.
pub struct EventStream<E> {
    receiver: mpsc::Receiver<E>,
}

impl<E> EventStream<E> {
    pub fn new(receiver: mpsc::Receiver<E>) -> Self {
        Self { receiver }
    }

    /// Receive the next event; `None` once the adapter closes the stream
    pub async fn recv(&mut self) -> Option<E> {
        self.receiver.recv().await
    }
}

/// View model for the voting menu
#[derive(Debug, Clone)]
pub struct BallotMenu {
    pub topic_labels: Vec<String>,
    pub count_options: Vec<u32>,
    /// Window length, for the countdown line
    pub seconds: u64,
}

/// View model for one rendered question
#[derive(Debug, Clone)]
pub struct QuestionView {
    pub index: u32,
    pub prompt: String,
    /// Already shuffled; the correct answer has no fixed slot
    pub answer_labels: Vec<String>,
    pub seconds: u64,
}

/// How the ballot message should be closed out after resolution
#[derive(Debug, Clone)]
pub enum BallotClose {
    Cancelled,
    Resolved {
        /// Winning option label — "Random" when the sentinel won
        winning_topic_label: String,
        question_count: u32,
    },
}

/// Rendering boundary for quiz sessions
#[async_trait]
pub trait QuizUi: Send + Sync {
    /// Render the voting menu; events arrive on the returned stream
    async fn render_ballots(
        &self,
        channel: ChannelId,
        menu: &BallotMenu,
    ) -> Result<(MessageHandle, EventStream<BallotEvent>), UiError>;

    /// Render one question; answer submissions arrive on the stream
    async fn render_question(
        &self,
        channel: ChannelId,
        view: &QuestionView,
    ) -> Result<(MessageHandle, EventStream<AnswerEvent>), UiError>;

    /// Refresh the remaining-time line of a rendered message
    ///
    /// `status` carries the current tallies (vote counts, respondents) so
    /// the rendered message can echo them alongside the countdown.
    async fn update_countdown(
        &self,
        handle: &MessageHandle,
        seconds_left: u64,
        status: &str,
    ) -> Result<(), UiError>;

    /// Highlight the winning options and disable further ballot input
    async fn finish_ballots(
        &self,
        handle: &MessageHandle,
        close: &BallotClose,
    ) -> Result<(), UiError>;

    /// Highlight the correct answer, disable input, attach a reference
    async fn reveal_answer(
        &self,
        handle: &MessageHandle,
        question: &Question,
        learn_more_url: Option<&str>,
    ) -> Result<(), UiError>;

    /// Post the final standings to the channel
    async fn post_standings(
        &self,
        channel: ChannelId,
        standings: &[Standing],
    ) -> Result<(), UiError>;
}
