//! # Error Policy
//!
//! Backoff for failed reconciliation passes.
//!
//! The reconciler never retries a step itself; a failed pass is re-queued here
//! with a per-resource exponential delay so one failing issuer cannot slow
//! down the others.

use crate::controller::reconciler::ReconcileError;
use crate::crd::GenericIssuer;
use crate::observability;
use crate::runtime::context::ControllerContext;
use kube_runtime::controller::Action;
use std::sync::Arc;
use tracing::{error, info};

/// Requeue a failed issuer after its next backoff delay
pub fn handle_reconciliation_error<I: GenericIssuer>(
    obj: Arc<I>,
    error: &ReconcileError,
    ctx: Arc<ControllerContext>,
) -> Action {
    let issuer_ref = obj.issuer_ref();

    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.reconciliation_error",
        genericissuer = %issuer_ref,
        kind = %issuer_ref.kind,
    );
    let _error_guard = error_span.enter();

    error!(error = %error, "Reconciliation error for {}", issuer_ref);
    observability::metrics::increment_reconciliation_errors(
        issuer_ref.kind.as_str(),
        error.metric_label(),
    );

    let (delay, error_count) = ctx.next_backoff(&issuer_ref);
    info!(
        backoff_secs = delay.as_secs(),
        error_count, "Retrying with exponential backoff"
    );

    Action::requeue(delay)
}
