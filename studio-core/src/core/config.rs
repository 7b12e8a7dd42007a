//! Runtime configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | required |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `ENVIRONMENT` | `development` |
//! | `LOG_LEVEL` | `info` |
//! | `LOG_DIR` | unset (stdout only) |
//! | `PRICING_SAFETY_FACTOR_PERCENT` | `4.5` |
//! | `SETUP_FULLY_CONFIGURED_THRESHOLD` | `90` |
//! | `AUDIT_BUFFER_SIZE` | `256` |
//! | `ENABLE_AUDIT_LOG` | `true` |

use std::str::FromStr;

use thiserror::Error;

use crate::pricing::{DEFAULT_SAFETY_FACTOR_PERCENT, PricingPolicy};
use crate::setup::SetupPolicy;
use crate::setup::aggregator::DEFAULT_FULLY_CONFIGURED_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    pub database_max_connections: u32,
    /// Environment: development | staging | production
    pub environment: String,
    pub log_level: String,
    /// Daily rolling log files go here when set
    pub log_dir: Option<String>,
    pub safety_factor_percent: f64,
    /// 0–100
    pub fully_configured_threshold: i32,
    pub audit_buffer_size: usize,
    pub enable_audit_log: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let safety_factor_percent = parse_or(
            &var,
            "PRICING_SAFETY_FACTOR_PERCENT",
            DEFAULT_SAFETY_FACTOR_PERCENT,
        )?;
        if !safety_factor_percent.is_finite() || safety_factor_percent < 0.0 {
            return Err(ConfigError::Invalid {
                name: "PRICING_SAFETY_FACTOR_PERCENT",
                value: safety_factor_percent.to_string(),
            });
        }

        let fully_configured_threshold = parse_or(
            &var,
            "SETUP_FULLY_CONFIGURED_THRESHOLD",
            DEFAULT_FULLY_CONFIGURED_THRESHOLD,
        )?;
        if !(0..=100).contains(&fully_configured_threshold) {
            return Err(ConfigError::Invalid {
                name: "SETUP_FULLY_CONFIGURED_THRESHOLD",
                value: fully_configured_threshold.to_string(),
            });
        }

        Ok(Self {
            database_url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            database_max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?,
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
            safety_factor_percent,
            fully_configured_threshold,
            audit_buffer_size: parse_or(&var, "AUDIT_BUFFER_SIZE", 256)?,
            enable_audit_log: parse_or(&var, "ENABLE_AUDIT_LOG", true)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            safety_factor_percent: self.safety_factor_percent,
        }
    }

    pub fn setup_policy(&self) -> SetupPolicy {
        SetupPolicy {
            fully_configured_threshold: self.fully_configured_threshold,
        }
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value: raw,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/studio")]).unwrap();
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.pricing_policy(), PricingPolicy::default());
        assert_eq!(config.setup_policy(), SetupPolicy::default());
        assert_eq!(config.audit_buffer_size, 256);
        assert!(config.enable_audit_log);
        assert!(!config.is_production());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/studio"),
            ("ENVIRONMENT", "production"),
            ("LOG_DIR", "/var/log/studio"),
            ("PRICING_SAFETY_FACTOR_PERCENT", "5"),
            ("SETUP_FULLY_CONFIGURED_THRESHOLD", "80"),
            ("ENABLE_AUDIT_LOG", "false"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/studio"));
        assert_eq!(config.pricing_policy().safety_factor_percent, 5.0);
        assert_eq!(config.setup_policy().fully_configured_threshold, 80);
        assert!(!config.enable_audit_log);
    }

    #[test]
    fn test_database_url_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = load(&[
            ("DATABASE_URL", "postgres://db/studio"),
            ("SETUP_FULLY_CONFIGURED_THRESHOLD", "120"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = load(&[
            ("DATABASE_URL", "postgres://db/studio"),
            ("AUDIT_BUFFER_SIZE", "lots"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { name: "AUDIT_BUFFER_SIZE", .. }
        ));

        let err = load(&[
            ("DATABASE_URL", "postgres://db/studio"),
            ("PRICING_SAFETY_FACTOR_PERCENT", "-1"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
