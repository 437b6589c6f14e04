//! JSON-file score ledger
//!
//! Durable store for cumulative scores and the per-channel active flags.
//! Active flags carry a timestamp and expire after a TTL, so a process
//! crash mid-session cannot leave a channel permanently marked active.
//! Writes go through a temp file and rename, keeping the file intact if
//! the process dies mid-write.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use quizcord_application::{LedgerError, ScoreLedger};
use quizcord_domain::{ChannelId, GuildId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// On-disk shape of the ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LedgerFile {
    #[serde(default)]
    scores: HashMap<String, u32>,
    #[serde(default)]
    active_channels: HashMap<String, DateTime<Utc>>,
}

/// File-backed [`ScoreLedger`] implementation
pub struct JsonScoreLedger {
    path: PathBuf,
    active_flag_ttl: Duration,
    state: Mutex<LedgerFile>,
}

impl JsonScoreLedger {
    /// Open (or create) the ledger file
    pub async fn open(path: PathBuf, active_flag_ttl_secs: u64) -> Result<Self, LedgerError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| LedgerError::WriteFailed(e.to_string()))?;
        }

        let state = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| LedgerError::ReadFailed(format!("corrupt ledger file: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => LedgerFile::default(),
            Err(e) => return Err(LedgerError::ReadFailed(e.to_string())),
        };

        info!(path = %path.display(), "score ledger opened");
        Ok(Self {
            path,
            active_flag_ttl: Duration::seconds(active_flag_ttl_secs as i64),
            state: Mutex::new(state),
        })
    }

    fn score_key(user: UserId, guild: GuildId) -> String {
        format!("{guild}:{user}")
    }

    async fn persist(&self, state: &LedgerFile) -> Result<(), LedgerError> {
        let raw = serde_json::to_string_pretty(state)
            .map_err(|e| LedgerError::WriteFailed(e.to_string()))?;

        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| LedgerError::WriteFailed(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| LedgerError::WriteFailed(e.to_string()))
    }

    fn is_fresh(&self, stamp: &DateTime<Utc>) -> bool {
        Utc::now() - *stamp <= self.active_flag_ttl
    }
}

#[async_trait]
impl ScoreLedger for JsonScoreLedger {
    async fn get_score(&self, user: UserId, guild: GuildId) -> Result<u32, LedgerError> {
        let state = self.state.lock().await;
        Ok(state
            .scores
            .get(&Self::score_key(user, guild))
            .copied()
            .unwrap_or(0))
    }

    async fn set_score(
        &self,
        user: UserId,
        guild: GuildId,
        score: u32,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;
        state.scores.insert(Self::score_key(user, guild), score);
        self.persist(&state).await
    }

    async fn is_channel_active(&self, channel: ChannelId) -> Result<bool, LedgerError> {
        let state = self.state.lock().await;
        match state.active_channels.get(&channel.to_string()) {
            Some(stamp) if self.is_fresh(stamp) => Ok(true),
            Some(_) => {
                debug!(channel = %channel, "stale active flag treated as inactive");
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn set_channel_active(&self, channel: ChannelId) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;
        state
            .active_channels
            .insert(channel.to_string(), Utc::now());
        self.persist(&state).await
    }

    async fn set_channel_inactive(&self, channel: ChannelId) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;
        state.active_channels.remove(&channel.to_string());
        self.persist(&state).await
    }
}
