//! Session execution parameters

use std::time::Duration;

/// Process-wide parameters for running quiz sessions
///
/// `voting_time` is read once at startup and used for both the voting
/// window and every per-question answer window.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// Duration of the voting window and of each answer window
    pub voting_time: Duration,
    /// How many catalog topics the voting menu shows (plus "Random")
    pub topic_choices: usize,
    /// Question-count options on the menu
    pub count_options: Vec<u32>,
    /// How many standings lines to report at the end
    pub top_n: usize,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            voting_time: Duration::from_secs(10),
            topic_choices: 3,
            count_options: vec![5, 10, 15],
            top_n: 3,
        }
    }
}
