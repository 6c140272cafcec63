//! # Reconcile
//!
//! One pass: validate, resolve, optionally probe, then write the Ready condition.
//!
//! | Step                | Ready condition             | Event   |
//! |---------------------|-----------------------------|---------|
//! | validation fails    | False / `Validation`        | Warning |
//! | resolution fails    | False / `Error`             | Warning |
//! | probe fails         | untouched                   | none    |
//! | success             | True / `Verified`           | Normal  |

use crate::constants::{actions, reasons};
use crate::controller::reconciler::status::set_issuer_condition;
use crate::controller::reconciler::types::{GenericIssuerReconciler, ReconcileError};
use crate::controller::reconciler::validation::validate_issuer;
use crate::crd::{ConditionStatus, GenericIssuer, CONDITION_TYPE_READY};
use chrono::Utc;
use kube::runtime::events::EventType;
use kube_runtime::controller::Action;
use tracing::{error, info};

impl GenericIssuerReconciler {
    /// Run one reconciliation pass over `issuer`.
    ///
    /// The in-memory status of `issuer` is updated alongside the persisted one.
    /// No step is retried here; every error is returned so the caller's
    /// backoff re-runs the whole pass.
    ///
    /// # Errors
    ///
    /// The first failing step's error, or the status write error if that
    /// write fails.
    pub async fn reconcile<I: GenericIssuer>(
        &self,
        issuer: &mut I,
    ) -> Result<Action, ReconcileError> {
        let issuer_ref = issuer.issuer_ref();
        let spec = issuer.issuer_spec().clone();

        if let Err(err) = validate_issuer(&spec, self.settings.default_region.as_deref()) {
            error!(genericissuer = %issuer_ref, kind = %issuer_ref.kind, error = %err, "failed to validate issuer");
            self.set_status(
                issuer,
                ConditionStatus::False,
                reasons::VALIDATION,
                &format!("Failed to validate resource: {err}"),
            )
            .await?;
            return Err(err.into());
        }

        let config = match self.resolver.resolve(&issuer_ref, &spec).await {
            Ok(config) => config,
            Err(err) => {
                error!(genericissuer = %issuer_ref, kind = %issuer_ref.kind, error = %err, "Error loading config");
                self.set_status(
                    issuer,
                    ConditionStatus::False,
                    reasons::ERROR,
                    &err.to_string(),
                )
                .await?;
                return Err(err.into());
            }
        };

        if self.settings.get_caller_identity {
            match self.prober.probe(&config).await {
                Ok(identity) => info!(
                    genericissuer = %issuer_ref,
                    arn = identity.arn.as_deref().unwrap_or_default(),
                    account = identity.account.as_deref().unwrap_or_default(),
                    user_id = identity.user_id.as_deref().unwrap_or_default(),
                    "sts.GetCallerIdentity"
                ),
                Err(err) => {
                    error!(genericissuer = %issuer_ref, kind = %issuer_ref.kind, error = %err, "failed to sts.GetCallerIdentity");
                    return Err(err.into());
                }
            }
        }

        self.set_status(
            issuer,
            ConditionStatus::True,
            reasons::VERIFIED,
            "Issuer verified",
        )
        .await?;

        Ok(Action::await_change())
    }

    /// Set the Ready condition, emit the matching event and persist status
    async fn set_status<I: GenericIssuer>(
        &self,
        issuer: &mut I,
        status: ConditionStatus,
        reason: &str,
        message: &str,
    ) -> Result<(), ReconcileError> {
        let issuer_ref = issuer.issuer_ref();
        let object_ref = issuer.object_reference();

        let issuer_status = issuer.issuer_status_mut();
        set_issuer_condition(
            issuer_status,
            CONDITION_TYPE_READY,
            status,
            reason,
            message,
            Utc::now(),
        );

        let event_type = if status == ConditionStatus::False {
            EventType::Warning
        } else {
            EventType::Normal
        };
        self.events
            .publish(
                &object_ref,
                event_type,
                reason,
                actions::RECONCILE,
                Some(message.to_string()),
            )
            .await;

        self.status_writer
            .replace_status(&issuer_ref, issuer_status)
            .await
            .map_err(ReconcileError::StatusUpdate)
    }
}
