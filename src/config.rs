// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime configuration
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `FLEET_LOG` | `info` | tracing filter directive |
//! | `FLEET_RECENT_MAINTENANCE_MONTHS` | `6` | window for "recent maintenance" |

use serde::{Deserialize, Serialize};

use crate::domain::DEFAULT_RECENT_MAINTENANCE_MONTHS;

pub const LOG_ENV: &str = "FLEET_LOG";
pub const RECENT_MAINTENANCE_MONTHS_ENV: &str = "FLEET_RECENT_MAINTENANCE_MONTHS";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Fleet service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Log filter passed to the tracing subscriber
    pub log_filter: String,
    /// Trailing window, in months, used by recent-maintenance checks
    pub recent_maintenance_months: u32,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            recent_maintenance_months: DEFAULT_RECENT_MAINTENANCE_MONTHS,
        }
    }
}

impl FleetConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let log_filter = lookup(LOG_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.log_filter);

        let recent_maintenance_months = match lookup(RECENT_MAINTENANCE_MONTHS_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| ConfigError::InvalidValue {
                    var: RECENT_MAINTENANCE_MONTHS_ENV,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => defaults.recent_maintenance_months,
        };

        Ok(Self {
            log_filter,
            recent_maintenance_months,
        })
    }
}
