// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Workflow configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Delay between finality polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Total time a write may wait for its attesting root.
pub const DEFAULT_FINALITY_TIMEOUT_MS: u64 = 5_000;

pub const ENV_POLL_INTERVAL_MS: &str = "KVPROOF_POLL_INTERVAL_MS";
pub const ENV_FINALITY_TIMEOUT_MS: &str = "KVPROOF_FINALITY_TIMEOUT_MS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub poll_interval_ms: u64,
    pub finality_timeout_ms: u64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            finality_timeout_ms: DEFAULT_FINALITY_TIMEOUT_MS,
        }
    }
}

impl WorkflowConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn finality_timeout(&self) -> Duration {
        Duration::from_millis(self.finality_timeout_ms)
    }

    /// Load from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&raw)?;
        cfg.validate()
    }

    /// Apply `KVPROOF_*` environment overrides.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup (the environment, in production).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_POLL_INTERVAL_MS) {
            self.poll_interval_ms = parse_millis(ENV_POLL_INTERVAL_MS, v)?;
        }
        if let Some(v) = lookup(ENV_FINALITY_TIMEOUT_MS) {
            self.finality_timeout_ms = parse_millis(ENV_FINALITY_TIMEOUT_MS, v)?;
        }
        self.validate()
    }

    /// A zero interval would spin the poll loop without ever sleeping.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(self)
    }
}

fn parse_millis(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = WorkflowConfig::default();
        assert_eq!(cfg.poll_interval(), Duration::from_millis(100));
        assert_eq!(cfg.finality_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_json_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "finality_timeout_ms": 750 }}"#).unwrap();

        let cfg = WorkflowConfig::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.finality_timeout_ms, 750);
        assert_eq!(cfg.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
    }

    #[test]
    fn test_json_file_rejects_zero_interval() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "poll_interval_ms": 0 }}"#).unwrap();

        let err = WorkflowConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroPollInterval));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [(ENV_POLL_INTERVAL_MS, "25"), (ENV_FINALITY_TIMEOUT_MS, " 1000 ")]
            .into_iter()
            .collect();
        let cfg = WorkflowConfig::default()
            .with_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.poll_interval_ms, 25);
        assert_eq!(cfg.finality_timeout_ms, 1000);
    }

    #[test]
    fn test_override_garbage() {
        let err = WorkflowConfig::default()
            .with_overrides(|name| (name == ENV_FINALITY_TIMEOUT_MS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name: ENV_FINALITY_TIMEOUT_MS, .. }));
    }
}
