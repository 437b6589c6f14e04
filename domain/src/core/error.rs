//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Value is not an option on this ballot: {0}")]
    UnknownBallotValue(String),

    #[error("Ballot has no options")]
    EmptyBallot,

    #[error("Topic catalog is empty")]
    EmptyCatalog,

    #[error("Topic has no content categories: {0}")]
    TopicHasNoCategories(String),

    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
