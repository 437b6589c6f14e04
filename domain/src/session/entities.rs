//! Session domain entities

use crate::core::error::DomainError;
use crate::core::ids::{ChannelId, GuildId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle phase of a quiz session
///
/// `Completed` and `Cancelled` are terminal; a channel may only host a
/// new session once its current one has reached a terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    Voting,
    Questioning,
    Completed,
    Cancelled,
}

impl SessionPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Cancelled)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionPhase::Voting => "Voting",
            SessionPhase::Questioning => "Questioning",
            SessionPhase::Completed => "Completed",
            SessionPhase::Cancelled => "Cancelled",
        };
        write!(f, "{name}")
    }
}

/// One full quiz run for one channel (Entity)
#[derive(Debug, Clone)]
pub struct QuizSession {
    channel_id: ChannelId,
    guild_id: GuildId,
    phase: SessionPhase,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Create a session in the voting phase
    pub fn start(channel_id: ChannelId, guild_id: GuildId) -> Self {
        Self {
            channel_id,
            guild_id,
            phase: SessionPhase::Voting,
            started_at: Utc::now(),
        }
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn guild_id(&self) -> GuildId {
        self.guild_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn begin_questioning(&mut self) -> Result<(), DomainError> {
        self.transition(SessionPhase::Voting, SessionPhase::Questioning)
    }

    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition(SessionPhase::Questioning, SessionPhase::Completed)
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        self.transition(SessionPhase::Voting, SessionPhase::Cancelled)
    }

    fn transition(&mut self, from: SessionPhase, to: SessionPhase) -> Result<(), DomainError> {
        if self.phase != from {
            return Err(DomainError::InvalidTransition {
                from: self.phase.to_string(),
                to: to.to_string(),
            });
        }
        self.phase = to;
        Ok(())
    }
}

/// One ranked line of the final standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub user: UserId,
    pub score: u32,
}

/// Per-session correct-answer counts, in arrival order
///
/// Independent of the persisted ledger totals — this tally is ephemeral
/// and only feeds the final standings of the running session.
#[derive(Debug, Clone, Default)]
pub struct ParticipantTally {
    entries: Vec<Standing>,
}

impl ParticipantTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one correct answer for the user
    ///
    /// First-time participants are appended, so ties in the standings
    /// keep arrival order.
    pub fn record_correct(&mut self, user: UserId) {
        match self.entries.iter_mut().find(|e| e.user == user) {
            Some(entry) => entry.score += 1,
            None => self.entries.push(Standing { user, score: 1 }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn score_of(&self, user: &UserId) -> u32 {
        self.entries
            .iter()
            .find(|e| e.user == *user)
            .map(|e| e.score)
            .unwrap_or(0)
    }

    /// Standings sorted by score descending; ties keep arrival order
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings = self.entries.clone();
        standings.sort_by(|a, b| b.score.cmp(&a.score));
        standings
    }

    /// The top `n` of the standings
    pub fn top(&self, n: usize) -> Vec<Standing> {
        let mut standings = self.standings();
        standings.truncate(n);
        standings
    }
}
