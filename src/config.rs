//! Process configuration, read once from the environment at startup.

use std::time::Duration;
use thiserror::Error;

use crate::monitor::Mode;

pub const DEFAULT_STATUS_URL: &str = "https://na.finalfantasyxiv.com/lodestone/worldstatus";
const DEFAULT_WORLD: &str = "Behemoth";
const DEFAULT_INTERVAL_MINUTES: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub channel_id: u64,
    pub client_id: u64,
    pub role_id: Option<u64>,
    pub interval_minutes: u64,
    pub dev_mode: bool,
    pub world: String,
    pub status_url: String,
}

impl Config {
    /// Load from the process environment. Missing required variables are
    /// collected and reported together so the operator fixes them in one
    /// pass.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut missing = Vec::new();
        let token = require(&get, "DISCORD_TOKEN", &mut missing);
        let channel = require(&get, "CHANNEL_ID", &mut missing);
        let client = require(&get, "CLIENT_ID", &mut missing);

        let (Some(token), Some(channel), Some(client)) = (token, channel, client) else {
            return Err(ConfigError::Missing(missing));
        };

        let channel_id = parse_id("CHANNEL_ID", &channel)?;
        let client_id = parse_id("CLIENT_ID", &client)?;

        let role_id = match get("ROLE_ID").filter(|v| !v.trim().is_empty()) {
            Some(v) => Some(parse_id("ROLE_ID", &v)?),
            None => None,
        };

        let interval_minutes = match get("CHECK_INTERVAL").filter(|v| !v.trim().is_empty()) {
            Some(v) => {
                let minutes = parse_u64("CHECK_INTERVAL", &v)?;
                if minutes == 0 {
                    return Err(ConfigError::Invalid {
                        name: "CHECK_INTERVAL",
                        value: v,
                        reason: "must be at least 1 minute",
                    });
                }
                minutes
            }
            None => DEFAULT_INTERVAL_MINUTES,
        };

        let dev_mode = match get("DEV_MODE").filter(|v| !v.trim().is_empty()) {
            Some(v) => parse_bool("DEV_MODE", &v)?,
            None => false,
        };

        let world = get("WORLD_NAME")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WORLD.to_string());

        let status_url = get("STATUS_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS_URL.to_string());

        Ok(Self {
            token,
            channel_id,
            client_id,
            role_id,
            interval_minutes,
            dev_mode,
            world,
            status_url,
        })
    }

    pub fn mode(&self) -> Mode {
        if self.dev_mode {
            Mode::Dev
        } else {
            Mode::Standard
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

fn require(
    get: &impl Fn(&str) -> Option<String>,
    name: &str,
    missing: &mut Vec<String>,
) -> Option<String> {
    let value = get(name).filter(|v| !v.trim().is_empty());
    if value.is_none() {
        missing.push(name.to_string());
    }
    value
}

fn parse_u64(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: "expected an unsigned integer",
    })
}

/// Discord snowflake IDs are nonzero by construction; serenity's Id types
/// reject zero, so catch it here with a better diagnostic.
fn parse_id(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    let id = parse_u64(name, value)?;
    if id == 0 {
        return Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "must be a nonzero Discord ID",
        });
    }
    Ok(id)
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("DISCORD_TOKEN", "token-value"),
        ("CHANNEL_ID", "123456789"),
        ("CLIENT_ID", "987654321"),
    ];

    #[test]
    fn test_all_missing_variables_listed_at_once() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        match err {
            ConfigError::Missing(names) => {
                assert_eq!(names, vec!["DISCORD_TOKEN", "CHANNEL_ID", "CLIENT_ID"]);
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("CHANNEL_ID", "  "),
            ("CLIENT_ID", "1"),
        ]))
        .unwrap_err();
        match err {
            ConfigError::Missing(names) => assert_eq!(names, vec!["CHANNEL_ID"]),
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&REQUIRED)).unwrap();
        assert_eq!(config.channel_id, 123456789);
        assert_eq!(config.client_id, 987654321);
        assert_eq!(config.role_id, None);
        assert_eq!(config.interval_minutes, 5);
        assert!(!config.dev_mode);
        assert_eq!(config.mode(), Mode::Standard);
        assert_eq!(config.world, "Behemoth");
        assert_eq!(config.status_url, DEFAULT_STATUS_URL);
        assert_eq!(config.interval(), Duration::from_secs(300));
    }

    #[test]
    fn test_optional_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("ROLE_ID", "555"),
            ("CHECK_INTERVAL", "1"),
            ("DEV_MODE", "true"),
            ("WORLD_NAME", "Excalibur"),
            ("STATUS_URL", "http://localhost:8080/worldstatus"),
        ]);
        let config = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.role_id, Some(555));
        assert_eq!(config.interval_minutes, 1);
        assert_eq!(config.mode(), Mode::Dev);
        assert_eq!(config.world, "Excalibur");
        assert_eq!(config.status_url, "http://localhost:8080/worldstatus");
    }

    #[test]
    fn test_invalid_number_is_fatal() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CHECK_INTERVAL", "five"));
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "CHECK_INTERVAL",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("CHECK_INTERVAL", "0"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_zero_channel_id_rejected() {
        let err = Config::from_lookup(lookup(&[
            ("DISCORD_TOKEN", "token"),
            ("CHANNEL_ID", "0"),
            ("CLIENT_ID", "1"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "CHANNEL_ID",
                ..
            }
        ));
    }

    #[test]
    fn test_bool_spellings() {
        for (raw, expected) in [("true", true), ("1", true), ("YES", true), ("false", false), ("0", false), ("no", false)] {
            let mut vars = REQUIRED.to_vec();
            vars.push(("DEV_MODE", raw));
            let config = Config::from_lookup(lookup(&vars)).unwrap();
            assert_eq!(config.dev_mode, expected, "raw={raw}");
        }
        let mut vars = REQUIRED.to_vec();
        vars.push(("DEV_MODE", "maybe"));
        assert!(Config::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn test_missing_error_message_names_variables() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("DISCORD_TOKEN"));
        assert!(msg.contains("CHANNEL_ID"));
        assert!(msg.contains("CLIENT_ID"));
    }
}
