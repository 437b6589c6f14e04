//! Topics and adaptive sub-category selection
//!
//! Flat topics map to a single content-provider category. Branching
//! topics carry several sub-categories; the selector escalates towards
//! the sub-category the participant pool has answered correctly most
//! often so far.

use crate::core::ids::CategoryId;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a topic maps to content-provider categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TopicContent {
    /// One fixed category id
    Flat(CategoryId),
    /// Several sub-categories, chosen adaptively per round
    Branching(Vec<CategoryId>),
}

/// A playable quiz topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub content: TopicContent,
}

impl Topic {
    pub fn flat(name: impl Into<String>, category: CategoryId) -> Self {
        Self {
            name: name.into(),
            content: TopicContent::Flat(category),
        }
    }

    pub fn branching(name: impl Into<String>, categories: Vec<CategoryId>) -> Self {
        Self {
            name: name.into(),
            content: TopicContent::Branching(categories),
        }
    }

    pub fn has_sub_topics(&self) -> bool {
        matches!(self.content, TopicContent::Branching(_))
    }
}

/// Per-category correct-answer counts accumulated across a session
#[derive(Debug, Clone, Default)]
pub struct TopicPerformance {
    correct_by_category: HashMap<CategoryId, u32>,
}

impl TopicPerformance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one correct answer for the category
    pub fn record_correct(&mut self, category: CategoryId) {
        *self.correct_by_category.entry(category).or_insert(0) += 1;
    }

    pub fn correct_count(&self, category: &CategoryId) -> u32 {
        self.correct_by_category.get(category).copied().unwrap_or(0)
    }
}

/// Pick the content category for the next round
///
/// Flat topics always map to their fixed category. For branching topics
/// the sub-category with the highest correct count so far wins, ties
/// resolved uniformly at random; with no correct answers recorded yet the
/// draw is uniform over all sub-categories. Stateless — the performance
/// map is passed in per call.
///
/// Returns `None` only for a branching topic with an empty category list.
pub fn select_category<R: Rng>(
    topic: &Topic,
    performance: &TopicPerformance,
    rng: &mut R,
) -> Option<CategoryId> {
    match &topic.content {
        TopicContent::Flat(category) => Some(*category),
        TopicContent::Branching(categories) => {
            let max = categories
                .iter()
                .map(|c| performance.correct_count(c))
                .max()?;

            let leaders: Vec<CategoryId> = categories
                .iter()
                .filter(|c| performance.correct_count(c) == max)
                .copied()
                .collect();
            leaders.choose(rng).copied()
        }
    }
}
