//! # Controller Context
//!
//! State shared by every reconciliation of both issuer kinds.

use crate::config::ControllerConfig;
use crate::controller::reconciler::GenericIssuerReconciler;
use crate::crd::IssuerRef;
use crate::runtime::backoff::ExponentialBackoff;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::warn;

/// Context handed to `kube_runtime::Controller`
#[derive(Debug)]
pub struct ControllerContext {
    pub reconciler: GenericIssuerReconciler,
    pub reconcile_timeout: Duration,
    backoff_min: Duration,
    backoff_max: Duration,
    /// Retry state keyed by `kind/namespace/name`
    backoff_states: Mutex<HashMap<String, ExponentialBackoff>>,
}

impl ControllerContext {
    #[must_use]
    pub fn new(reconciler: GenericIssuerReconciler, config: &ControllerConfig) -> Self {
        Self {
            reconciler,
            reconcile_timeout: config.reconcile_timeout(),
            backoff_min: config.backoff_min(),
            backoff_max: config.backoff_max(),
            backoff_states: Mutex::new(HashMap::new()),
        }
    }

    /// Record a failure for `issuer` and return the delay before the next attempt
    /// along with the number of consecutive failures
    pub fn next_backoff(&self, issuer: &IssuerRef) -> (Duration, u32) {
        match self.backoff_states.lock() {
            Ok(mut states) => {
                let state = states
                    .entry(backoff_key(issuer))
                    .or_insert_with(|| ExponentialBackoff::new(self.backoff_min, self.backoff_max));
                let delay = state.next_backoff();
                (delay, state.error_count())
            }
            Err(e) => {
                warn!(
                    "Failed to lock backoff_states: {}, using minimum backoff",
                    e
                );
                (self.backoff_min, 0)
            }
        }
    }

    /// Forget the failure history of `issuer` after a successful pass
    pub fn reset_backoff(&self, issuer: &IssuerRef) {
        if let Ok(mut states) = self.backoff_states.lock() {
            states.remove(&backoff_key(issuer));
        }
    }
}

fn backoff_key(issuer: &IssuerRef) -> String {
    format!("{}/{issuer}", issuer.kind)
}
