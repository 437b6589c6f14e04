//! Question and answer-sheet entities

use crate::core::ids::{CategoryId, UserId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Question format, as delivered by the content provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple,
    Boolean,
}

/// One trivia question within a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position in the question loop
    pub index: u32,
    pub prompt: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
    pub kind: QuestionKind,
    pub topic_id: CategoryId,
}

impl Question {
    /// Answer labels to present for this question
    ///
    /// Multiple-choice answers are shuffled so the correct one has no
    /// fixed slot; boolean questions always show True/False in order.
    pub fn answer_labels<R: Rng>(&self, rng: &mut R) -> Vec<String> {
        match self.kind {
            QuestionKind::Multiple => {
                let mut labels: Vec<String> = self.incorrect_answers.clone();
                labels.push(self.correct_answer.clone());
                labels.shuffle(rng);
                labels
            }
            QuestionKind::Boolean => vec!["True".to_string(), "False".to_string()],
        }
    }
}

/// An answer submission arriving during a question window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerEvent {
    pub voter: UserId,
    pub label: String,
}

/// Per-question answer records with last-write-wins semantics
///
/// Only the final submission recorded before the window closes counts
/// for grading; earlier submissions by the same voter are overwritten.
/// Voters keep their first-submission order, so grading output is stable
/// and downstream tallies rank ties by arrival.
#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers_by_voter: HashMap<UserId, String>,
    arrival_order: Vec<UserId>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record or overwrite the voter's answer
    pub fn record(&mut self, voter: UserId, label: impl Into<String>) {
        if self.answers_by_voter.insert(voter, label.into()).is_none() {
            self.arrival_order.push(voter);
        }
    }

    pub fn final_answer(&self, voter: &UserId) -> Option<&str> {
        self.answers_by_voter.get(voter).map(String::as_str)
    }

    pub fn respondent_count(&self) -> usize {
        self.arrival_order.len()
    }

    /// Voters whose final recorded answer matches the correct one,
    /// in first-submission order
    pub fn grade(&self, correct_answer: &str) -> Vec<UserId> {
        self.arrival_order
            .iter()
            .filter(|voter| self.final_answer(voter) == Some(correct_answer))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            index: 1,
            prompt: "What is the chemical symbol for gold?".to_string(),
            correct_answer: "Au".to_string(),
            incorrect_answers: vec!["Ag".to_string(), "Fe".to_string(), "Pb".to_string()],
            kind: QuestionKind::Multiple,
            topic_id: CategoryId(17),
        }
    }

    #[test]
    fn test_last_write_wins() {
        let mut sheet = AnswerSheet::new();
        sheet.record(UserId(1), "A");
        sheet.record(UserId(1), "B");
        sheet.record(UserId(1), "A");

        assert_eq!(sheet.final_answer(&UserId(1)), Some("A"));
        assert_eq!(sheet.respondent_count(), 1);
        assert_eq!(sheet.grade("A"), vec![UserId(1)]);
        assert!(sheet.grade("B").is_empty());
    }

    #[test]
    fn test_grade_collects_correct_voters() {
        let mut sheet = AnswerSheet::new();
        sheet.record(UserId(1), "Au");
        sheet.record(UserId(2), "Ag");
        sheet.record(UserId(3), "Au");

        assert_eq!(sheet.grade("Au"), vec![UserId(1), UserId(3)]);
    }

    #[test]
    fn test_multiple_labels_contain_all_answers() {
        let q = question();
        let mut rng = rand::thread_rng();
        let labels = q.answer_labels(&mut rng);

        assert_eq!(labels.len(), 4);
        assert!(labels.contains(&q.correct_answer));
        for incorrect in &q.incorrect_answers {
            assert!(labels.contains(incorrect));
        }
    }

    #[test]
    fn test_boolean_labels_fixed() {
        let q = Question {
            kind: QuestionKind::Boolean,
            correct_answer: "True".to_string(),
            incorrect_answers: vec!["False".to_string()],
            ..question()
        };
        let mut rng = rand::thread_rng();
        assert_eq!(q.answer_labels(&mut rng), vec!["True", "False"]);
    }
}
