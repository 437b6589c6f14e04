//! Ballot primitives for the voting phase
//!
//! A ballot is one named category of mutually exclusive options (topic,
//! question count). Each voter holds at most one recorded choice per
//! ballot; re-voting overwrites the previous choice, it never duplicates.

use crate::core::error::DomainError;
use crate::core::ids::UserId;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

/// One selectable option on a ballot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BallotOption<V> {
    /// Label shown to voters (e.g., "10 Questions")
    pub label: String,
    /// Value registered when the option is chosen
    pub value: V,
}

impl<V> BallotOption<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A ballot box holding one recorded choice per voter
///
/// Per-option counts are always derived from the voter map, so replacing
/// a prior vote atomically moves one count from the old value to the new
/// one — there is no intermediate state where both are counted.
///
/// # Example
///
/// ```
/// use quizcord_domain::core::ids::UserId;
/// use quizcord_domain::vote::ballot::{Ballot, BallotOption};
///
/// let mut ballot = Ballot::new(vec![
///     BallotOption::new("5 Questions", 5u32),
///     BallotOption::new("10 Questions", 10u32),
/// ]);
/// ballot.cast(UserId(1), 10).unwrap();
/// ballot.cast(UserId(1), 5).unwrap();
/// assert_eq!(ballot.count(&10), 0);
/// assert_eq!(ballot.count(&5), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Ballot<V> {
    options: Vec<BallotOption<V>>,
    votes_by_voter: HashMap<UserId, V>,
}

impl<V: Clone + Eq + Hash + Display> Ballot<V> {
    pub fn new(options: Vec<BallotOption<V>>) -> Self {
        Self {
            options,
            votes_by_voter: HashMap::new(),
        }
    }

    pub fn options(&self) -> &[BallotOption<V>] {
        &self.options
    }

    /// Record or overwrite the voter's single choice for this ballot
    ///
    /// Re-casting the identical value is a no-op. Values outside the
    /// option set are rejected.
    pub fn cast(&mut self, voter: UserId, value: V) -> Result<(), DomainError> {
        if !self.options.iter().any(|o| o.value == value) {
            return Err(DomainError::UnknownBallotValue(value.to_string()));
        }
        self.votes_by_voter.insert(voter, value);
        Ok(())
    }

    /// Current vote count for a value, derived from the voter map
    pub fn count(&self, value: &V) -> usize {
        self.votes_by_voter.values().filter(|v| *v == value).count()
    }

    /// Number of voters with a currently-recorded vote on this ballot
    pub fn total_votes(&self) -> usize {
        self.votes_by_voter.len()
    }

    /// Distinct voters who have a recorded vote on this ballot
    pub fn voters(&self) -> impl Iterator<Item = &UserId> {
        self.votes_by_voter.keys()
    }

    pub fn choice_of(&self, voter: &UserId) -> Option<&V> {
        self.votes_by_voter.get(voter)
    }

    /// The value with the maximum vote count
    ///
    /// Ties are resolved uniformly at random among the leading values. A
    /// ballot with zero votes ties every option at 0, so the winner is a
    /// uniform draw over the whole option set.
    pub fn winner<R: Rng>(&self, rng: &mut R) -> Result<V, DomainError> {
        let max = self
            .options
            .iter()
            .map(|o| self.count(&o.value))
            .max()
            .ok_or(DomainError::EmptyBallot)?;

        let leaders: Vec<&V> = self
            .options
            .iter()
            .filter(|o| self.count(&o.value) == max)
            .map(|o| &o.value)
            .collect();

        leaders
            .choose(rng)
            .map(|v| (*v).clone())
            .ok_or(DomainError::EmptyBallot)
    }
}
