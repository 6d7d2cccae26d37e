mod llm;
mod places;
mod server;

pub use llm::*;
pub use places::*;
pub use server::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub places: PlacesConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good. Missing credentials
    /// are warnings, not errors: the Concierge endpoints still serve
    /// fallback recommendations without them.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if self.server.port == 0 {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "server.port".into(),
                message: "port must be non-zero".into(),
            });
        }

        if let Some(rl) = &self.server.rate_limit {
            if rl.requests_per_second == 0 || rl.burst_size == 0 {
                issues.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "server.rate_limit".into(),
                    message: "requests_per_second and burst_size must be > 0".into(),
                });
            }
        }

        if std::env::var(&self.llm.api_key_env).is_err() {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "llm.api_key_env".into(),
                message: format!(
                    "env var '{}' not set; planner will use the order-based fallback",
                    self.llm.api_key_env
                ),
            });
        }

        if std::env::var(&self.places.api_key_env).is_err() {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "places.api_key_env".into(),
                message: format!(
                    "env var '{}' not set; location backfill via Places is disabled",
                    self.places.api_key_env
                ),
            });
        }

        if self.places.timeout_secs == 0 {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "places.timeout_secs".into(),
                message: "timeout must be > 0 seconds".into(),
            });
        }

        issues
    }
}
