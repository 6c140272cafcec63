//! # Metrics
//!
//! Prometheus metrics for monitoring the controller.
//!
//! ## Metrics Exposed
//!
//! - `aws_pca_issuer_reconciliations_total{kind}` - Reconciliation passes started
//! - `aws_pca_issuer_reconciliation_errors_total{kind,reason}` - Failed passes by failing step
//! - `aws_pca_issuer_reconciliation_duration_seconds{kind}` - Duration of a pass

use anyhow::Result;
use prometheus::{HistogramVec, IntCounterVec, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static RECONCILIATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "aws_pca_issuer_reconciliations_total",
            "Total number of issuer reconciliations",
        ),
        &["kind"],
    )
    .expect("Failed to create RECONCILIATIONS_TOTAL metric - this should never happen")
});

static RECONCILIATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "aws_pca_issuer_reconciliation_errors_total",
            "Total number of issuer reconciliation errors by failing step",
        ),
        &["kind", "reason"],
    )
    .expect("Failed to create RECONCILIATION_ERRORS_TOTAL metric - this should never happen")
});

static RECONCILIATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "aws_pca_issuer_reconciliation_duration_seconds",
            "Duration of issuer reconciliation in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["kind"],
    )
    .expect("Failed to create RECONCILIATION_DURATION metric - this should never happen")
});

/// Register all controller metrics with [`REGISTRY`]
///
/// # Errors
///
/// Fails if a metric is already registered.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(RECONCILIATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_DURATION.clone()))?;

    Ok(())
}

pub fn increment_reconciliations(kind: &str) {
    RECONCILIATIONS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn increment_reconciliation_errors(kind: &str, reason: &str) {
    RECONCILIATION_ERRORS_TOTAL
        .with_label_values(&[kind, reason])
        .inc();
}

pub fn observe_reconciliation_duration(kind: &str, duration: f64) {
    RECONCILIATION_DURATION
        .with_label_values(&[kind])
        .observe(duration);
}

/// Snapshot of all registered metrics
#[must_use]
pub fn gather() -> Vec<prometheus::proto::MetricFamily> {
    REGISTRY.gather()
}
