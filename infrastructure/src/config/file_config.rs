//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file
//! and carry the defaults every field falls back to.

use quizcord_application::SessionParams;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Session timing and menu settings
    pub quiz: FileQuizConfig,
    /// Content provider settings
    pub api: FileApiConfig,
    /// Score ledger settings
    pub ledger: FileLedgerConfig,
}

impl FileConfig {
    /// Session parameters for the application layer
    pub fn session_params(&self) -> SessionParams {
        SessionParams {
            voting_time: Duration::from_secs(self.quiz.voting_time_secs),
            topic_choices: self.quiz.topic_choices,
            count_options: self.quiz.count_options.clone(),
            top_n: self.quiz.top_n,
        }
    }
}

/// `[quiz]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQuizConfig {
    /// Voting window and per-question window, in seconds
    pub voting_time_secs: u64,
    /// Catalog topics shown on the menu (plus "Random")
    pub topic_choices: usize,
    /// Question-count options on the menu
    pub count_options: Vec<u32>,
    /// Standings lines reported at the end
    pub top_n: usize,
}

impl Default for FileQuizConfig {
    fn default() -> Self {
        Self {
            voting_time_secs: 10,
            topic_choices: 3,
            count_options: vec![5, 10, 15],
            top_n: 3,
        }
    }
}

/// `[api]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    pub base_url: String,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opentdb.com".to_string(),
        }
    }
}

/// `[ledger]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLedgerConfig {
    /// Ledger file location; defaults to the XDG data directory
    pub path: Option<PathBuf>,
    /// Active flags older than this are treated as stale, so a crashed
    /// session cannot wedge a channel forever
    pub active_flag_ttl_secs: u64,
}

impl Default for FileLedgerConfig {
    fn default() -> Self {
        Self {
            path: None,
            active_flag_ttl_secs: 600,
        }
    }
}

impl FileLedgerConfig {
    /// The configured path, or the XDG data directory default
    pub fn resolved_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("quizcord")
                .join("ledger.json")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_session_params() {
        let config = FileConfig::default();
        let params = config.session_params();

        assert_eq!(params.voting_time, Duration::from_secs(10));
        assert_eq!(params.topic_choices, 3);
        assert_eq!(params.count_options, vec![5, 10, 15]);
        assert_eq!(params.top_n, 3);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [quiz]
            voting_time_secs = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.quiz.voting_time_secs, 30);
        assert_eq!(config.quiz.count_options, vec![5, 10, 15]);
        assert_eq!(config.api.base_url, "https://opentdb.com");
        assert_eq!(config.ledger.active_flag_ttl_secs, 600);
    }
}
