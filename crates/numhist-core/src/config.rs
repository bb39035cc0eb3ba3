//! Bot configuration
//!
//! Built once at startup and passed explicitly to everything that needs it.
//! Layering, lowest precedence first: built-in defaults, an optional TOML
//! file, then environment variables. CLI flags are applied on top by the
//! binary.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{HistoryError, Result};
use crate::moderation::DEFAULT_HISTORY_LIMIT;
use crate::phone::DEFAULT_COUNTRY_CODE;

const DATA_DIR: &str = "numhist";
const DATABASE_FILE: &str = "history.db";

pub const BOT_TOKEN_ENV_VAR: &str = "BOT_TOKEN";
pub const DATABASE_ENV_VAR: &str = "HISTORY_DB";
pub const MODERATORS_ENV_VAR: &str = "ADMIN_IDS";
pub const COUNTRY_CODE_ENV_VAR: &str = "NUMHIST_COUNTRY_CODE";

/// Immutable runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Chat transport credential (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bot_token: Option<String>,

    /// SQLite database path
    #[serde(default = "default_database")]
    pub database: PathBuf,

    /// User ids allowed to run moderator commands
    #[serde(default)]
    pub moderators: BTreeSet<i64>,

    /// Country code for bare 10-digit numbers, without `+`
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Maximum entries shown by `/history`
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_database() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(DATA_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATABASE_FILE)
}

fn default_country_code() -> String {
    DEFAULT_COUNTRY_CODE.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            database: default_database(),
            moderators: BTreeSet::new(),
            country_code: default_country_code(),
            history_limit: default_history_limit(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            HistoryError::invalid_config(path.display().to_string(), e.to_string())
        })?;
        let config: BotConfig = toml::from_str(&content)?;
        config.validate(&path.display().to_string())?;
        Ok(config)
    }

    /// Resolve the full configuration: defaults, then `file` (if any), then
    /// the process environment.
    pub fn resolve(file: Option<&Path>) -> Result<Self> {
        let base = match file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        base.with_env(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides read through `lookup`
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(BOT_TOKEN_ENV_VAR).filter(|t| !t.trim().is_empty()) {
            self.bot_token = Some(token);
        }
        if let Some(db) = lookup(DATABASE_ENV_VAR).filter(|d| !d.trim().is_empty()) {
            self.database = PathBuf::from(db);
        }
        if let Some(ids) = lookup(MODERATORS_ENV_VAR).filter(|i| !i.trim().is_empty()) {
            self.moderators = parse_moderator_ids(&ids)?;
        }
        if let Some(cc) = lookup(COUNTRY_CODE_ENV_VAR).filter(|c| !c.trim().is_empty()) {
            self.country_code = cc.trim().trim_start_matches('+').to_string();
        }
        self.validate("environment")?;
        Ok(self)
    }

    fn validate(&self, source_name: &str) -> Result<()> {
        if self.country_code.is_empty() || !self.country_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(HistoryError::invalid_config(
                source_name,
                format!("country_code must be digits, got {:?}", self.country_code),
            ));
        }
        if self.history_limit == 0 {
            return Err(HistoryError::invalid_config(
                source_name,
                "history_limit must be at least 1",
            ));
        }
        Ok(())
    }

    pub fn is_moderator(&self, user_id: i64) -> bool {
        self.moderators.contains(&user_id)
    }

    /// Copy suitable for display, with the bot token masked
    pub fn redacted(&self) -> Self {
        Self {
            bot_token: self.bot_token.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }

    /// Render as TOML, in the same layout `load` accepts
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| HistoryError::Other(format!("failed to serialize config: {}", e)))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }
}

/// Parse a comma-separated list of user ids; blank segments are skipped
pub fn parse_moderator_ids(raw: &str) -> Result<BTreeSet<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>().map_err(|_| {
                HistoryError::invalid_config(MODERATORS_ENV_VAR, format!("not an integer: {}", s))
            })
        })
        .collect()
}
