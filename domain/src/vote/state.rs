//! Voting-phase tallying state
//!
//! One value holding the three logical ballots of a voting phase: topic
//! choice (a sample of the catalog plus the "Random" sentinel), question
//! count, and cancellation. Inbound UI events are applied one at a time,
//! and the state is only resolved once the voting window has expired.

use crate::core::error::DomainError;
use crate::core::ids::UserId;
use crate::topic::selector::Topic;
use crate::vote::ballot::{Ballot, BallotOption};
use crate::vote::cancel::CancelGate;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Sentinel topic option that redraws from the full catalog on win
pub const RANDOM_TOPIC: &str = "Random";

/// A voter action on one of the voting-phase ballots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallotEvent {
    Topic { voter: UserId, choice: String },
    Count { voter: UserId, choice: u32 },
    CancelToggle { voter: UserId },
}

impl BallotEvent {
    pub fn voter(&self) -> UserId {
        match self {
            BallotEvent::Topic { voter, .. } => *voter,
            BallotEvent::Count { voter, .. } => *voter,
            BallotEvent::CancelToggle { voter } => *voter,
        }
    }
}

/// Result of resolving a voting phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    /// A majority of participants voted to cancel
    Cancelled,
    Resolved(ResolvedVote),
}

/// The `(count, topic)` pair a completed vote produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVote {
    pub question_count: u32,
    /// The topic that will actually be played
    pub topic: Topic,
    /// The option label that won the ballot — stays "Random" even when
    /// the played topic is a redraw
    pub winning_label: String,
}

/// Ballots, cancel gate, and participant set for one voting phase
#[derive(Debug, Clone)]
pub struct VotingState {
    catalog: Vec<Topic>,
    topic_ballot: Ballot<String>,
    count_ballot: Ballot<u32>,
    cancel: CancelGate,
    participants: HashSet<UserId>,
}

impl VotingState {
    /// Build the phase state from the full topic catalog
    ///
    /// Shows `topic_choices` distinct topics drawn at random from the
    /// catalog, plus the "Random" option; the full catalog is kept for
    /// the redraw on a "Random" win.
    pub fn new<R: Rng>(
        catalog: Vec<Topic>,
        topic_choices: usize,
        count_options: &[u32],
        rng: &mut R,
    ) -> Result<Self, DomainError> {
        if catalog.is_empty() {
            return Err(DomainError::EmptyCatalog);
        }

        let mut topic_options: Vec<BallotOption<String>> = catalog
            .choose_multiple(rng, topic_choices.min(catalog.len()))
            .map(|t| BallotOption::new(t.name.clone(), t.name.clone()))
            .collect();
        topic_options.push(BallotOption::new(RANDOM_TOPIC, RANDOM_TOPIC.to_string()));

        let count_ballot = Ballot::new(
            count_options
                .iter()
                .map(|&n| BallotOption::new(format!("{n} Questions"), n))
                .collect(),
        );

        Ok(Self {
            catalog,
            topic_ballot: Ballot::new(topic_options),
            count_ballot,
            cancel: CancelGate::new(),
            participants: HashSet::new(),
        })
    }

    /// Apply one voter action
    ///
    /// Every action registers its voter as a phase participant, which is
    /// the denominator the cancel gate is checked against.
    pub fn apply(&mut self, event: BallotEvent) -> Result<(), DomainError> {
        self.participants.insert(event.voter());
        match event {
            BallotEvent::Topic { voter, choice } => self.topic_ballot.cast(voter, choice),
            BallotEvent::Count { voter, choice } => self.count_ballot.cast(voter, choice),
            BallotEvent::CancelToggle { voter } => {
                self.cancel.toggle(voter);
                Ok(())
            }
        }
    }

    pub fn topic_labels(&self) -> Vec<String> {
        self.topic_ballot
            .options()
            .iter()
            .map(|o| o.label.clone())
            .collect()
    }

    pub fn count_options(&self) -> Vec<u32> {
        self.count_ballot.options().iter().map(|o| o.value).collect()
    }

    /// Current `(label, votes)` pairs for the topic ballot
    pub fn topic_tallies(&self) -> Vec<(String, usize)> {
        self.topic_ballot
            .options()
            .iter()
            .map(|o| (o.label.clone(), self.topic_ballot.count(&o.value)))
            .collect()
    }

    /// Current `(label, votes)` pairs for the question-count ballot
    pub fn count_tallies(&self) -> Vec<(String, usize)> {
        self.count_ballot
            .options()
            .iter()
            .map(|o| (o.label.clone(), self.count_ballot.count(&o.value)))
            .collect()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancel.cancel_count()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled(self.participants.len())
    }

    /// Resolve the phase after the window has expired
    ///
    /// Cancellation wins outright. Otherwise both ballots resolve through
    /// their winners; a "Random" topic win is replaced by a uniform draw
    /// from the full catalog while the displayed winner label stays
    /// "Random".
    pub fn resolve<R: Rng>(&self, rng: &mut R) -> Result<VoteOutcome, DomainError> {
        if self.is_cancelled() {
            return Ok(VoteOutcome::Cancelled);
        }

        let winning_label = self.topic_ballot.winner(rng)?;
        let topic = if winning_label == RANDOM_TOPIC {
            self.catalog
                .choose(rng)
                .cloned()
                .ok_or(DomainError::EmptyCatalog)?
        } else {
            self.catalog
                .iter()
                .find(|t| t.name == winning_label)
                .cloned()
                .ok_or_else(|| DomainError::UnknownBallotValue(winning_label.clone()))?
        };

        let question_count = self.count_ballot.winner(rng)?;

        Ok(VoteOutcome::Resolved(ResolvedVote {
            question_count,
            topic,
            winning_label,
        }))
    }
}
