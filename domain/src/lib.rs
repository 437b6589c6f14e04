//! Domain layer for quizcord
//!
//! This crate contains the core quiz-session logic and entities. It has
//! no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Voting phase
//!
//! A session opens with a fixed voting window over three ballots: topic
//! choice, question count, and cancellation. Tallying lives in
//! [`VotingState`]; a strict majority of participants can cancel the
//! session before any question is asked.
//!
//! ## Question rounds
//!
//! Each round collects answers with last-write-wins semantics into an
//! [`AnswerSheet`] and grades them against the correct answer once the
//! window closes. Correct answers feed both the session standings and
//! the adaptive sub-category selection for branching topics.

pub mod core;
pub mod question;
pub mod session;
pub mod topic;
pub mod vote;

// Re-export commonly used types
pub use self::core::error::DomainError;
pub use self::core::ids::{CategoryId, ChannelId, GuildId, UserId};
pub use question::{AnswerEvent, AnswerSheet, Question, QuestionKind};
pub use session::{ParticipantTally, QuizSession, SessionPhase, Standing};
pub use topic::{Topic, TopicContent, TopicPerformance, select_category};
pub use vote::{
    Ballot, BallotEvent, BallotOption, CancelGate, RANDOM_TOPIC, ResolvedVote, VoteOutcome,
    VotingState,
};
