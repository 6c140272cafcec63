//! # Controller Configuration
//!
//! Controller-level settings loaded from environment variables.

use crate::constants::{
    DEFAULT_BACKOFF_MAX_SECS, DEFAULT_BACKOFF_MIN_SECS, DEFAULT_CONTROLLER_NAMESPACE,
    DEFAULT_METRICS_PORT, DEFAULT_RECONCILE_TIMEOUT_SECS,
};
use std::time::Duration;

/// Controller-level configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
/// The values are read once at process start and passed down explicitly; nothing
/// below this layer reads the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Process-wide default AWS region (`AWS_REGION`).
    /// Used when an issuer spec has no region.
    pub aws_default_region: Option<String>,
    /// Call `sts:GetCallerIdentity` after resolving credentials and log the result
    pub get_caller_identity: bool,
    /// Namespace the controller runs in.
    /// Cluster issuer secrets without an explicit namespace are read from here.
    pub controller_namespace: String,
    /// Port for `/metrics`, `/healthz` and `/readyz`
    pub metrics_port: u16,
    /// Upper bound on a single reconciliation pass (seconds)
    pub reconcile_timeout_secs: u64,
    /// First retry delay after a failed pass (seconds)
    pub backoff_min_secs: u64,
    /// Ceiling for the retry delay (seconds)
    pub backoff_max_secs: u64,
    /// Default log filter when `RUST_LOG` is unset (ERROR, WARN, INFO, DEBUG, TRACE)
    pub log_level: String,
    /// Log format (json, text)
    pub log_format: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            aws_default_region: None,
            get_caller_identity: true,
            controller_namespace: DEFAULT_CONTROLLER_NAMESPACE.to_string(),
            metrics_port: DEFAULT_METRICS_PORT,
            reconcile_timeout_secs: DEFAULT_RECONCILE_TIMEOUT_SECS,
            backoff_min_secs: DEFAULT_BACKOFF_MIN_SECS,
            backoff_max_secs: DEFAULT_BACKOFF_MAX_SECS,
            log_level: "INFO".to_string(),
            log_format: "json".to_string(),
        }
    }
}

impl ControllerConfig {
    /// Load configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            aws_default_region: lookup("AWS_REGION").filter(|region| !region.is_empty()),
            get_caller_identity: parse_bool(lookup("GET_CALLER_IDENTITY"))
                .unwrap_or(defaults.get_caller_identity),
            controller_namespace: lookup("POD_NAMESPACE")
                .filter(|ns| !ns.is_empty())
                .unwrap_or(defaults.controller_namespace),
            metrics_port: parse_or(lookup("METRICS_PORT"), defaults.metrics_port),
            reconcile_timeout_secs: parse_or(
                lookup("RECONCILE_TIMEOUT_SECS"),
                defaults.reconcile_timeout_secs,
            ),
            backoff_min_secs: parse_or(lookup("BACKOFF_MIN_SECS"), defaults.backoff_min_secs),
            backoff_max_secs: parse_or(lookup("BACKOFF_MAX_SECS"), defaults.backoff_max_secs),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: lookup("LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Get reconcile timeout duration
    #[must_use]
    pub fn reconcile_timeout(&self) -> Duration {
        Duration::from_secs(self.reconcile_timeout_secs)
    }

    /// Get minimum backoff duration
    #[must_use]
    pub fn backoff_min(&self) -> Duration {
        Duration::from_secs(self.backoff_min_secs)
    }

    /// Get maximum backoff duration
    #[must_use]
    pub fn backoff_max(&self) -> Duration {
        Duration::from_secs(self.backoff_max_secs)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn parse_bool(value: Option<String>) -> Option<bool> {
    value.map(|v| {
        let v_lower = v.to_lowercase();
        v_lower == "true" || v_lower == "1" || v_lower == "yes" || v_lower == "on"
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ControllerConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ControllerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        assert_eq!(config_from(&[]), ControllerConfig::default());
    }

    #[test]
    fn test_region_and_probe_flag() {
        let config = config_from(&[("AWS_REGION", "eu-west-1"), ("GET_CALLER_IDENTITY", "false")]);
        assert_eq!(config.aws_default_region.as_deref(), Some("eu-west-1"));
        assert!(!config.get_caller_identity);
    }

    #[test]
    fn test_empty_region_is_unset() {
        let config = config_from(&[("AWS_REGION", "")]);
        assert_eq!(config.aws_default_region, None);
    }

    #[test]
    fn test_unparsable_numbers_fall_back() {
        let config = config_from(&[("METRICS_PORT", "not-a-port"), ("RECONCILE_TIMEOUT_SECS", "10")]);
        assert_eq!(config.metrics_port, DEFAULT_METRICS_PORT);
        assert_eq!(config.reconcile_timeout(), Duration::from_secs(10));
    }
}
