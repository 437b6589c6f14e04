//! Trivia content provider port

use async_trait::async_trait;
use quizcord_domain::{CategoryId, Question, Topic};
use thiserror::Error;

/// Errors from the content provider — fatal to a running session
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Malformed payload: {0}")]
    BadPayload(String),

    #[error("Provider returned no questions")]
    NoQuestions,
}

/// Provider session token, scoping question de-duplication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

/// Source of trivia questions and the topic catalog
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Request a fresh session token
    async fn request_token(&self) -> Result<SessionToken, ContentError>;

    /// Fetch `amount` questions for a category
    async fn fetch_questions(
        &self,
        token: &SessionToken,
        category: CategoryId,
        amount: u32,
    ) -> Result<Vec<Question>, ContentError>;

    /// The full topic catalog offered for voting
    async fn topic_catalog(&self) -> Result<Vec<Topic>, ContentError>;
}
