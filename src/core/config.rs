//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};

/// Runtime configuration read from the process environment (and `.env`)
#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_path: String,
    /// Register commands on a single guild instead of globally
    pub discord_guild_id: Option<String>,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| anyhow!("{key} is not set in the environment or .env file"))
        };

        Ok(Config {
            discord_token: required("DISCORD_TOKEN")?,
            database_path: required("DATABASE_PATH")?,
            discord_guild_id: lookup("DISCORD_GUILD_ID").filter(|v| !v.trim().is_empty()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[("DATABASE_PATH", "notes.db")])).unwrap_err();
        assert!(err.to_string().contains("DISCORD_TOKEN"));
    }

    #[test]
    fn test_blank_database_path_is_fatal() {
        let err = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_PATH", "  "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("DATABASE_PATH"));
    }

    #[test]
    fn test_optional_values_default() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_PATH", "notes.db"),
        ]))
        .unwrap();

        assert_eq!(config.discord_token, "token");
        assert_eq!(config.database_path, "notes.db");
        assert_eq!(config.log_level, "info");
        assert!(config.discord_guild_id.is_none());
    }

    #[test]
    fn test_guild_and_log_level_override() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "token"),
            ("DATABASE_PATH", "notes.db"),
            ("DISCORD_GUILD_ID", "1234"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.discord_guild_id.as_deref(), Some("1234"));
        assert_eq!(config.log_level, "debug");
    }
}
