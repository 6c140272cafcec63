//! # Error Handling Tests
//!
//! Backoff, error policy and pass timeout of the controller runtime.

mod common;

use aws_pca_issuer_controller::config::ControllerConfig;
use aws_pca_issuer_controller::controller::reconciler::{ReconcileError, ValidationError};
use aws_pca_issuer_controller::crd::GenericIssuer;
use aws_pca_issuer_controller::runtime::context::ControllerContext;
use aws_pca_issuer_controller::runtime::error_policy::handle_reconciliation_error;
use aws_pca_issuer_controller::runtime::watch_loop::reconcile_issuer;
use common::{cluster_issuer, issuer, settings, spec, Harness, ResolveBehavior, TEST_ARN};
use kube_runtime::controller::Action;
use std::sync::Arc;
use std::time::Duration;

fn context(harness: &Harness, config: &ControllerConfig) -> Arc<ControllerContext> {
    let reconciler = harness.reconciler(settings(Some("us-east-1"), false));
    Arc::new(ControllerContext::new(reconciler, config))
}

fn config(backoff_min_secs: u64, backoff_max_secs: u64) -> ControllerConfig {
    ControllerConfig {
        backoff_min_secs,
        backoff_max_secs,
        ..ControllerConfig::default()
    }
}

#[test]
fn test_error_policy_backs_off_per_resource() {
    let harness = Harness::default();
    let ctx = context(&harness, &config(5, 15));
    let a = Arc::new(issuer("a", "default", spec(TEST_ARN, None)));
    let b = Arc::new(issuer("b", "default", spec(TEST_ARN, None)));
    let err = ReconcileError::Validation(ValidationError::MissingRegion);

    let delays: Vec<Action> = (0..4)
        .map(|_| handle_reconciliation_error(a.clone(), &err, ctx.clone()))
        .collect();
    assert_eq!(
        delays,
        vec![
            Action::requeue(Duration::from_secs(5)),
            Action::requeue(Duration::from_secs(10)),
            Action::requeue(Duration::from_secs(15)),
            Action::requeue(Duration::from_secs(15)),
        ]
    );

    // Another issuer starts from the minimum
    assert_eq!(
        handle_reconciliation_error(b, &err, ctx),
        Action::requeue(Duration::from_secs(5))
    );
}

#[test]
fn test_same_name_in_both_kinds_backs_off_independently() {
    let harness = Harness::default();
    let ctx = context(&harness, &config(5, 60));
    let namespaced = issuer("pca", "default", spec(TEST_ARN, None));
    let cluster = cluster_issuer("pca", spec(TEST_ARN, None));

    let (first, _) = ctx.next_backoff(&namespaced.issuer_ref());
    let (second, _) = ctx.next_backoff(&namespaced.issuer_ref());
    let (cluster_first, count) = ctx.next_backoff(&cluster.issuer_ref());

    assert_eq!(first, Duration::from_secs(5));
    assert_eq!(second, Duration::from_secs(10));
    assert_eq!(cluster_first, Duration::from_secs(5));
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_successful_pass_resets_backoff() {
    let harness = Harness::default().with_resolver(ResolveBehavior::Fail("denied".to_string()));
    let ctx = context(&harness, &config(5, 60));
    let obj = Arc::new(issuer("pca", "default", spec(TEST_ARN, None)));

    let err = reconcile_issuer(obj.clone(), ctx.clone())
        .await
        .expect_err("resolution should fail");
    assert_eq!(
        handle_reconciliation_error(obj.clone(), &err, ctx.clone()),
        Action::requeue(Duration::from_secs(5))
    );
    assert_eq!(
        handle_reconciliation_error(obj.clone(), &err, ctx.clone()),
        Action::requeue(Duration::from_secs(10))
    );

    harness.resolver.set_behavior(ResolveBehavior::Succeed);
    let action = reconcile_issuer(obj.clone(), ctx.clone())
        .await
        .expect("reconcile should succeed");
    assert_eq!(action, Action::await_change());

    assert_eq!(
        handle_reconciliation_error(obj, &err, ctx),
        Action::requeue(Duration::from_secs(5))
    );
}

#[tokio::test(start_paused = true)]
async fn test_pass_is_cancelled_on_timeout() {
    let harness = Harness::default().with_resolver(ResolveBehavior::Hang);
    let ctx = context(
        &harness,
        &ControllerConfig {
            reconcile_timeout_secs: 2,
            ..ControllerConfig::default()
        },
    );
    let obj = Arc::new(issuer("pca", "default", spec(TEST_ARN, None)));

    let err = reconcile_issuer(obj, ctx)
        .await
        .expect_err("pass should time out");

    assert!(matches!(err, ReconcileError::Timeout(d) if d == Duration::from_secs(2)));
    assert_eq!(harness.resolver.calls().len(), 1);
    assert!(
        harness.status.writes().is_empty(),
        "a cancelled pass writes no status"
    );
    assert!(harness.events.events().is_empty());
}

#[test]
fn test_error_metric_labels() {
    assert_eq!(
        ReconcileError::Validation(ValidationError::MissingRegion).metric_label(),
        "validation"
    );
    assert_eq!(
        ReconcileError::Timeout(Duration::from_secs(1)).metric_label(),
        "timeout"
    );
    assert_eq!(
        ReconcileError::StatusUpdate(anyhow::anyhow!("conflict")).metric_label(),
        "status_update"
    );
}
