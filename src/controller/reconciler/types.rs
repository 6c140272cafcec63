//! # Types
//!
//! Core types for the reconciler.

use crate::config::ControllerConfig;
use crate::controller::events::EventPublisher;
use crate::controller::reconciler::status::StatusWriter;
use crate::controller::reconciler::validation::ValidationError;
use crate::provider::{ConfigResolver, IdentityProber, ProbeError, ResolutionError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Terminal outcome of a failed reconciliation pass
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
    #[error(transparent)]
    Probe(#[from] ProbeError),
    #[error("failed to update issuer status: {0:#}")]
    StatusUpdate(#[source] anyhow::Error),
    #[error("reconciliation timed out after {0:?}")]
    Timeout(Duration),
}

impl ReconcileError {
    /// Low-cardinality label for metrics
    #[must_use]
    pub fn metric_label(&self) -> &'static str {
        match self {
            ReconcileError::Validation(_) => "validation",
            ReconcileError::Resolution(_) => "resolution",
            ReconcileError::Probe(_) => "probe",
            ReconcileError::StatusUpdate(_) => "status_update",
            ReconcileError::Timeout(_) => "timeout",
        }
    }
}

/// Settings that shape a reconciliation pass.
///
/// `Default` has no default region and the identity probe disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilerSettings {
    /// Process-wide default region, used when a spec has none
    pub default_region: Option<String>,
    /// Call `sts:GetCallerIdentity` after resolving credentials
    pub get_caller_identity: bool,
}

impl From<&ControllerConfig> for ReconcilerSettings {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            default_region: config.aws_default_region.clone(),
            get_caller_identity: config.get_caller_identity,
        }
    }
}

/// Reconciles `AWSPCAIssuer` and `AWSPCAClusterIssuer` resources.
///
/// Holds no per-issuer state; every pass resolves configuration afresh.
/// The controller runtime guarantees at most one in-flight pass per object,
/// so no locking happens here.
#[derive(Clone)]
pub struct GenericIssuerReconciler {
    pub(crate) resolver: Arc<dyn ConfigResolver>,
    pub(crate) prober: Arc<dyn IdentityProber>,
    pub(crate) status_writer: Arc<dyn StatusWriter>,
    pub(crate) events: Arc<dyn EventPublisher>,
    pub(crate) settings: ReconcilerSettings,
}

impl std::fmt::Debug for GenericIssuerReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericIssuerReconciler")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl GenericIssuerReconciler {
    #[must_use]
    pub fn new(
        resolver: Arc<dyn ConfigResolver>,
        prober: Arc<dyn IdentityProber>,
        status_writer: Arc<dyn StatusWriter>,
        events: Arc<dyn EventPublisher>,
        settings: ReconcilerSettings,
    ) -> Self {
        Self {
            resolver,
            prober,
            status_writer,
            events,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &ReconcilerSettings {
        &self.settings
    }
}
