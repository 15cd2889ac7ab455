//! Environment-driven bot configuration.

use crate::constants::DEFAULT_DATA_DIR;
use crate::gamehop::Privileged;
use serenity::model::id::{GuildId, UserId};
use std::path::PathBuf;
use thiserror::Error;

const TOKEN_VAR: &str = "DISCORD_TOKEN";
const PRIVILEGED_VAR: &str = "PRIVILEGED_USER_ID";
const GUILD_VAR: &str = "GUILD_ID";
const DATA_DIR_VAR: &str = "GAMEHOP_DATA_DIR";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("expected {0} in the environment or .env file")]
    Missing(&'static str),
    #[error("{var} must be a non-zero Discord id, got `{value}`")]
    InvalidId { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub privileged: Privileged,
    /// Register commands on this guild only; global registration otherwise.
    pub guild_id: Option<GuildId>,
    pub data_dir: PathBuf,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get(TOKEN_VAR).ok_or(ConfigError::Missing(TOKEN_VAR))?;
        let privileged_raw = get(PRIVILEGED_VAR).ok_or(ConfigError::Missing(PRIVILEGED_VAR))?;
        let privileged = Privileged::new(UserId::new(parse_id(PRIVILEGED_VAR, &privileged_raw)?));
        let guild_id = get(GUILD_VAR)
            .map(|raw| parse_id(GUILD_VAR, &raw).map(GuildId::new))
            .transpose()?;
        let data_dir = get(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            token,
            privileged,
            guild_id,
            data_dir,
        })
    }
}

fn parse_id(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(ConfigError::InvalidId {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = config_from(&[("DISCORD_TOKEN", "abc"), ("PRIVILEGED_USER_ID", "42")]).unwrap();
        assert_eq!(cfg.token, "abc");
        assert!(cfg.privileged.is(UserId::new(42)));
        assert_eq!(cfg.guild_id, None);
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn optional_values_are_read() {
        let cfg = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("PRIVILEGED_USER_ID", " 42 "),
            ("GUILD_ID", "77"),
            ("GAMEHOP_DATA_DIR", "/var/lib/gamehop"),
        ])
        .unwrap();
        assert_eq!(cfg.guild_id, Some(GuildId::new(77)));
        assert_eq!(cfg.data_dir, PathBuf::from("/var/lib/gamehop"));
    }

    #[test]
    fn missing_and_invalid_values_are_errors() {
        assert_eq!(
            config_from(&[("PRIVILEGED_USER_ID", "42")]).unwrap_err(),
            ConfigError::Missing("DISCORD_TOKEN")
        );
        assert_eq!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("PRIVILEGED_USER_ID", "  ")]).unwrap_err(),
            ConfigError::Missing("PRIVILEGED_USER_ID")
        );
        assert_eq!(
            config_from(&[("DISCORD_TOKEN", "abc"), ("PRIVILEGED_USER_ID", "0")]).unwrap_err(),
            ConfigError::InvalidId {
                var: "PRIVILEGED_USER_ID",
                value: "0".into()
            }
        );
        assert!(matches!(
            config_from(&[
                ("DISCORD_TOKEN", "abc"),
                ("PRIVILEGED_USER_ID", "42"),
                ("GUILD_ID", "guild"),
            ]),
            Err(ConfigError::InvalidId { var: "GUILD_ID", .. })
        ));
    }
}
