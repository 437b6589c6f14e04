//! Question entities and answer collection

pub mod entities;

pub use entities::{AnswerEvent, AnswerSheet, Question, QuestionKind};
