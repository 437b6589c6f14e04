//! Open Trivia DB content provider
//!
//! Adapter for the opentdb.com API. Payloads are requested base64-encoded
//! so prompts survive transport without HTML-entity mangling; a session
//! token scopes question de-duplication to one quiz session.

use super::catalog::builtin_catalog;
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use quizcord_application::{ContentError, ContentProvider, SessionToken};
use quizcord_domain::{CategoryId, Question, QuestionKind, Topic};
use serde::Deserialize;
use tracing::debug;

/// Provider response codes we care about
const CODE_OK: u8 = 0;
const CODE_NO_RESULTS: u8 = 1;
const CODE_TOKEN_NOT_FOUND: u8 = 3;
const CODE_TOKEN_EMPTY: u8 = 4;

/// HTTP adapter for the Open Trivia DB
pub struct OpenTriviaProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenTriviaProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ContentProvider for OpenTriviaProvider {
    async fn request_token(&self) -> Result<SessionToken, ContentError> {
        let url = format!("{}/api_token.php", self.base_url);
        let response: TokenResponse = self
            .client
            .get(&url)
            .query(&[("command", "request")])
            .send()
            .await
            .map_err(|e| ContentError::RequestFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| ContentError::BadPayload(e.to_string()))?;

        if response.response_code != CODE_OK {
            return Err(ContentError::Token(format!(
                "token request returned code {}",
                response.response_code
            )));
        }
        response
            .token
            .map(SessionToken)
            .ok_or_else(|| ContentError::Token("token missing from response".to_string()))
    }

    async fn fetch_questions(
        &self,
        token: &SessionToken,
        category: CategoryId,
        amount: u32,
    ) -> Result<Vec<Question>, ContentError> {
        let url = format!("{}/api.php", self.base_url);
        debug!(category = %category, amount, "fetching questions");

        let response: QuestionsResponse = self
            .client
            .get(&url)
            .query(&[
                ("amount", amount.to_string()),
                ("category", category.0.to_string()),
                ("token", token.0.clone()),
                ("encode", "base64".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ContentError::RequestFailed(e.to_string()))?
            .json()
            .await
            .map_err(|e| ContentError::BadPayload(e.to_string()))?;

        match response.response_code {
            CODE_OK => {}
            CODE_NO_RESULTS => return Err(ContentError::NoQuestions),
            CODE_TOKEN_NOT_FOUND | CODE_TOKEN_EMPTY => {
                return Err(ContentError::Token(format!(
                    "session token rejected (code {})",
                    response.response_code
                )));
            }
            code => {
                return Err(ContentError::RequestFailed(format!(
                    "provider returned code {code}"
                )));
            }
        }

        response
            .results
            .into_iter()
            .map(|wire| wire.into_question(category))
            .collect()
    }

    async fn topic_catalog(&self) -> Result<Vec<Topic>, ContentError> {
        Ok(builtin_catalog())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    response_code: u8,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    response_code: u8,
    #[serde(default)]
    results: Vec<WireQuestion>,
}

/// One question as delivered on the wire, base64-encoded fields
#[derive(Debug, Deserialize)]
struct WireQuestion {
    #[serde(rename = "type")]
    kind: String,
    question: String,
    correct_answer: String,
    incorrect_answers: Vec<String>,
}

impl WireQuestion {
    fn into_question(self, topic_id: CategoryId) -> Result<Question, ContentError> {
        let kind = match decode_field(&self.kind)?.as_str() {
            "multiple" => QuestionKind::Multiple,
            "boolean" => QuestionKind::Boolean,
            other => {
                return Err(ContentError::BadPayload(format!(
                    "unknown question type: {other}"
                )));
            }
        };

        Ok(Question {
            // The coordinator assigns the in-session index
            index: 0,
            prompt: decode_field(&self.question)?,
            correct_answer: decode_field(&self.correct_answer)?,
            incorrect_answers: self
                .incorrect_answers
                .iter()
                .map(|a| decode_field(a))
                .collect::<Result<_, _>>()?,
            kind,
            topic_id,
        })
    }
}

fn decode_field(raw: &str) -> Result<String, ContentError> {
    let bytes = BASE64
        .decode(raw)
        .map_err(|e| ContentError::BadPayload(format!("invalid base64: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ContentError::BadPayload(format!("invalid utf8: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> String {
        BASE64.encode(text)
    }

    #[test]
    fn test_wire_question_decodes() {
        let wire = WireQuestion {
            kind: encode("multiple"),
            question: encode("What is the chemical symbol for gold?"),
            correct_answer: encode("Au"),
            incorrect_answers: vec![encode("Ag"), encode("Fe")],
        };

        let question = wire.into_question(CategoryId(17)).unwrap();
        assert_eq!(question.kind, QuestionKind::Multiple);
        assert_eq!(question.prompt, "What is the chemical symbol for gold?");
        assert_eq!(question.correct_answer, "Au");
        assert_eq!(question.incorrect_answers, vec!["Ag", "Fe"]);
        assert_eq!(question.topic_id, CategoryId(17));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let wire = WireQuestion {
            kind: encode("essay"),
            question: encode("?"),
            correct_answer: encode("!"),
            incorrect_answers: vec![],
        };
        assert!(matches!(
            wire.into_question(CategoryId(9)),
            Err(ContentError::BadPayload(_))
        ));
    }

    #[test]
    fn test_garbage_base64_rejected() {
        assert!(matches!(
            decode_field("not base64!!"),
            Err(ContentError::BadPayload(_))
        ));
    }
}
