//! Durable score and active-flag store port
//!
//! The ledger holds cumulative per-user-per-guild scores across sessions
//! and the per-channel active flag that admission control checks. The
//! flag is the only session state requiring durability; everything else
//! is ephemeral.

use async_trait::async_trait;
use quizcord_domain::{ChannelId, GuildId, UserId};
use thiserror::Error;

/// Errors from the ledger — a score write failure aborts the session
/// rather than risk silent score loss
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger read failed: {0}")]
    ReadFailed(String),

    #[error("Ledger write failed: {0}")]
    WriteFailed(String),
}

/// Durable get/set of scores plus the per-channel exclusivity flag
#[async_trait]
pub trait ScoreLedger: Send + Sync {
    /// Cumulative score; 0 for users who never played
    async fn get_score(&self, user: UserId, guild: GuildId) -> Result<u32, LedgerError>;

    async fn set_score(&self, user: UserId, guild: GuildId, score: u32)
    -> Result<(), LedgerError>;

    /// Whether a non-terminal session is marked active for the channel
    async fn is_channel_active(&self, channel: ChannelId) -> Result<bool, LedgerError>;

    async fn set_channel_active(&self, channel: ChannelId) -> Result<(), LedgerError>;

    async fn set_channel_inactive(&self, channel: ChannelId) -> Result<(), LedgerError>;
}
