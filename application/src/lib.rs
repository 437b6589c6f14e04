//! Application layer for quizcord
//!
//! Use cases orchestrate quiz sessions against ports; adapters for those
//! ports live in the infrastructure layer and are injected at the
//! composition root.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SessionParams;
pub use ports::content_provider::{ContentError, ContentProvider, SessionToken};
pub use ports::quiz_ui::{
    BallotClose, BallotMenu, EventStream, MessageHandle, QuestionView, QuizUi, UiError,
};
pub use ports::reference_resolver::{NoReference, ReferenceResolver};
pub use ports::score_ledger::{LedgerError, ScoreLedger};
pub use use_cases::run_question_round::RunQuestionRound;
pub use use_cases::run_quiz_session::{RunQuizSession, SessionError, SessionOutcome};
pub use use_cases::run_voting_phase::{RunVotingPhase, VotingPhaseError};
