//! Environment-driven configuration, loaded once at startup.
//!
//! A `.env` file is honored if present. Required variables:
//!
//! ```text
//! DISCORD_TOKEN=...            # platform access token
//! SCHEDULE_CHANNEL_ID=1234     # intake channel for schedule commands
//! THREAD_CHANNEL_ID=5678       # container channel holding the private threads
//! ```
//!
//! Optional:
//!
//! ```text
//! TICK_INTERVAL_SECS=1                         # scheduler tick, default 1
//! SUBSCRIPTION_ROLES=Basic:111,Standard:222    # audience roles to mention
//! KEEP_ALIVE_PORT=8080                         # keep-alive HTTP port
//! ```

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    InvalidVar { var: &'static str, value: String },
}

/// Runtime configuration for the bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Platform access token.
    pub discord_token: String,
    /// Channel that receives schedule commands.
    pub schedule_channel_id: u64,
    /// Container channel holding the private threads to publish.
    pub thread_channel_id: u64,
    /// Scheduler tick interval. Smaller values reduce publish latency
    /// at the cost of polling overhead.
    pub tick_interval: Duration,
    /// Role name → role id, mentioned when a thread is published.
    pub subscription_roles: HashMap<String, u64>,
    /// Port for the keep-alive HTTP stub.
    pub keep_alive_port: u16,
}

/// Load configuration from the environment (and `.env` if present).
pub fn load() -> Result<BotConfig, ConfigError> {
    let _ = dotenvy::dotenv();

    let tick_secs: u64 = optional_parsed("TICK_INTERVAL_SECS")?.unwrap_or(1);
    if tick_secs == 0 {
        return Err(ConfigError::InvalidVar {
            var: "TICK_INTERVAL_SECS",
            value: "0".into(),
        });
    }

    let roles_raw = std::env::var("SUBSCRIPTION_ROLES").unwrap_or_default();

    Ok(BotConfig {
        discord_token: require("DISCORD_TOKEN")?,
        schedule_channel_id: require_parsed("SCHEDULE_CHANNEL_ID")?,
        thread_channel_id: require_parsed("THREAD_CHANNEL_ID")?,
        tick_interval: Duration::from_secs(tick_secs),
        subscription_roles: parse_roles(&roles_raw)?,
        keep_alive_port: optional_parsed("KEEP_ALIVE_PORT")?.unwrap_or(8080),
    })
}

/// Parse a `Name:id,Name:id` role list. Empty input yields an empty map.
pub fn parse_roles(raw: &str) -> Result<HashMap<String, u64>, ConfigError> {
    let invalid = || ConfigError::InvalidVar {
        var: "SUBSCRIPTION_ROLES",
        value: raw.to_string(),
    };

    let mut roles = HashMap::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, id) = entry.split_once(':').ok_or_else(invalid)?;
        let id: u64 = id.trim().parse().map_err(|_| invalid())?;
        roles.insert(name.trim().to_string(), id);
    }
    Ok(roles)
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn require_parsed<T: FromStr>(var: &'static str) -> Result<T, ConfigError> {
    let raw = require(var)?;
    raw.parse()
        .map_err(|_| ConfigError::InvalidVar { var, value: raw })
}

fn optional_parsed<T: FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { var, value: raw }),
        Err(_) => Ok(None),
    }
}
