//! Trivia content adapters

pub mod catalog;
pub mod open_trivia;

pub use catalog::builtin_catalog;
pub use open_trivia::OpenTriviaProvider;
