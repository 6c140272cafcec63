//! # Watch Loop
//!
//! Runs one `kube_runtime::Controller` per issuer kind and drives each
//! reconciliation pass under a timeout.

use crate::controller::reconciler::ReconcileError;
use crate::crd::{AWSPCAClusterIssuer, AWSPCAIssuer, GenericIssuer};
use crate::observability;
use crate::runtime::context::ControllerContext;
use crate::runtime::error_policy::handle_reconciliation_error;
use futures::StreamExt;
use kube::api::Api;
use kube::Client;
use kube_runtime::{controller::Action, watcher, Controller};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Instrument};

/// One reconciliation pass for `obj`, bounded by the configured timeout.
///
/// Dropping the pass on timeout cancels it before any later step runs.
pub async fn reconcile_issuer<I: GenericIssuer>(
    obj: Arc<I>,
    ctx: Arc<ControllerContext>,
) -> Result<Action, ReconcileError> {
    let issuer_ref = obj.issuer_ref();
    let kind = issuer_ref.kind.as_str();
    let span = tracing::info_span!("controller.reconcile", genericissuer = %issuer_ref, kind);

    async move {
        debug!("Reconciling issuer");
        observability::metrics::increment_reconciliations(kind);
        let start = Instant::now();

        let mut issuer = (*obj).clone();
        let result = match tokio::time::timeout(
            ctx.reconcile_timeout,
            ctx.reconciler.reconcile(&mut issuer),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(ReconcileError::Timeout(ctx.reconcile_timeout)),
        };

        observability::metrics::observe_reconciliation_duration(
            kind,
            start.elapsed().as_secs_f64(),
        );

        if result.is_ok() {
            ctx.reset_backoff(&issuer_ref);
        }
        result
    }
    .instrument(span)
    .await
}

/// Watch every `I` in the cluster until a shutdown signal arrives
pub async fn run_controller<I>(api: Api<I>, ctx: Arc<ControllerContext>)
where
    I: GenericIssuer + DeserializeOwned,
{
    info!(kind = %I::KIND, "Starting controller watch loop...");

    Controller::new(api, watcher::Config::default())
        .shutdown_on_signal()
        .run(
            reconcile_issuer::<I>,
            handle_reconciliation_error::<I>,
            ctx,
        )
        .for_each(|result| async move {
            match result {
                Ok((obj, _action)) => debug!(object = %obj, "reconciled"),
                Err(e) => warn!(kind = %I::KIND, error = %e, "reconcile failed"),
            }
        })
        .await;

    info!(kind = %I::KIND, "Controller watch loop stopped");
}

/// Run the `AWSPCAIssuer` and `AWSPCAClusterIssuer` controllers side by side
pub async fn run_watch_loops(client: Client, ctx: Arc<ControllerContext>) {
    let issuers: Api<AWSPCAIssuer> = Api::all(client.clone());
    let cluster_issuers: Api<AWSPCAClusterIssuer> = Api::all(client);

    futures::join!(
        run_controller(issuers, ctx.clone()),
        run_controller(cluster_issuers, ctx),
    );
}
