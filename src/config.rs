use std::net::SocketAddr;
use std::str::FromStr;
use thiserror::Error;

use crate::league::{DistributionalAward, RuleSettings, TrophyOptions};

pub const BIND_ADDR_VAR: &str = "LEAGUE_BIND_ADDR";
pub const DISTRIBUTIONAL_AWARD_VAR: &str = "LEAGUE_DISTRIBUTIONAL_AWARD";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{var} is not a valid socket address: {value}")]
    InvalidBindAddr { var: &'static str, value: String },

    #[error("{var} must be one of all_participants, winner_only, nobody; got {value}")]
    InvalidDistributionalAward { var: &'static str, value: String },
}

/// Server settings, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub default_rules: RuleSettings,
    pub trophy_options: TrophyOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            default_rules: RuleSettings::default(),
            trophy_options: TrophyOptions::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr =
            raw_addr
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddr {
                    var: BIND_ADDR_VAR,
                    value: raw_addr.clone(),
                })?;

        let distributional_award = match lookup(DISTRIBUTIONAL_AWARD_VAR) {
            Some(value) => DistributionalAward::from_str(value.trim()).map_err(|_| {
                ConfigError::InvalidDistributionalAward {
                    var: DISTRIBUTIONAL_AWARD_VAR,
                    value,
                }
            })?,
            None => DistributionalAward::default(),
        };

        Ok(Self {
            bind_addr,
            default_rules: RuleSettings::default(),
            trophy_options: TrophyOptions {
                distributional_award,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (BIND_ADDR_VAR, "127.0.0.1:8080"),
            (DISTRIBUTIONAL_AWARD_VAR, "winner_only"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.trophy_options.distributional_award,
            DistributionalAward::WinnerOnly
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(BIND_ADDR_VAR, "localhost")])),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            AppConfig::from_lookup(lookup(&[(DISTRIBUTIONAL_AWARD_VAR, "everyone")])),
            Err(ConfigError::InvalidDistributionalAward { .. })
        ));
    }
}
