//! # Constants
//!
//! Shared constants used throughout the controller.
//!
//! These values represent reasonable defaults and can be overridden via
//! configuration or environment variables where applicable.

/// Name reported as the event source and used for the AWS user agent
pub const CONTROLLER_NAME: &str = "aws-privateca-issuer";

/// Session name used when assuming the issuer's IAM role
pub const ASSUME_ROLE_SESSION_NAME: &str = "aws-privateca-issuer";

/// Default HTTP server port for metrics and health probes
pub const DEFAULT_METRICS_PORT: u16 = 8080;

/// Default upper bound on a single reconciliation pass (seconds)
pub const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 30;

/// Default first retry delay after a failed pass (seconds)
pub const DEFAULT_BACKOFF_MIN_SECS: u64 = 5;

/// Default ceiling for the retry delay after repeated failures (seconds)
pub const DEFAULT_BACKOFF_MAX_SECS: u64 = 300;

/// Namespace used for cluster issuer secrets when `POD_NAMESPACE` is unset
pub const DEFAULT_CONTROLLER_NAMESPACE: &str = "aws-privateca-issuer";

/// Condition reasons written by the reconciler
pub mod reasons {
    /// The issuer spec is incomplete
    pub const VALIDATION: &str = "Validation";
    /// AWS configuration could not be resolved
    pub const ERROR: &str = "Error";
    /// The issuer is usable
    pub const VERIFIED: &str = "Verified";
}

/// Event actions
pub mod actions {
    /// Standard reconciliation pass
    pub const RECONCILE: &str = "Reconcile";
}
