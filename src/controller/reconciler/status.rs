//! # Status Management
//!
//! Condition bookkeeping and the single status write of a pass.

use crate::constants::CONTROLLER_NAME;
use crate::crd::{
    AWSPCAClusterIssuer, AWSPCAIssuer, ConditionStatus, IssuerCondition, IssuerKind, IssuerRef,
    IssuerStatus,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use kube::api::{Api, Patch, PatchParams};
use kube::Client;
use tracing::debug;

/// Set a condition in place, keyed by type.
///
/// `lastTransitionTime` is kept when the status value is unchanged and set to
/// `now` otherwise. Reason and message are always rewritten together. Any
/// duplicate conditions of the same type are dropped.
pub fn set_issuer_condition(
    status: &mut IssuerStatus,
    condition_type: &str,
    condition_status: ConditionStatus,
    reason: &str,
    message: &str,
    now: DateTime<Utc>,
) {
    let now = now.to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut condition = IssuerCondition {
        condition_type: condition_type.to_string(),
        status: condition_status,
        reason: Some(reason.to_string()),
        message: Some(message.to_string()),
        last_transition_time: Some(now.clone()),
    };

    let Some(idx) = status
        .conditions
        .iter()
        .position(|c| c.condition_type == condition_type)
    else {
        debug!(
            condition = condition_type,
            time = %now,
            "setting lastTransitionTime for Issuer condition"
        );
        status.conditions.push(condition);
        return;
    };

    let existing = &status.conditions[idx];
    if existing.status == condition_status {
        condition.last_transition_time = existing
            .last_transition_time
            .clone()
            .or(condition.last_transition_time);
    } else {
        debug!(
            condition = condition_type,
            old_status = %existing.status,
            new_status = %condition_status,
            time = %now,
            "found status change for Issuer condition; setting lastTransitionTime"
        );
    }
    status.conditions[idx] = condition;

    let mut seen = false;
    status.conditions.retain(|c| {
        if c.condition_type != condition_type {
            return true;
        }
        let keep = !seen;
        seen = true;
        keep
    });
}

/// Persists an issuer's status sub-resource
#[async_trait]
pub trait StatusWriter: Send + Sync {
    /// Replace the issuer's status with `status` in one call
    async fn replace_status(&self, issuer: &IssuerRef, status: &IssuerStatus) -> Result<()>;
}

/// [`StatusWriter`] against the Kubernetes status endpoint
#[derive(Clone)]
pub struct KubeStatusWriter {
    client: Client,
}

impl std::fmt::Debug for KubeStatusWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeStatusWriter").finish_non_exhaustive()
    }
}

impl KubeStatusWriter {
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusWriter for KubeStatusWriter {
    async fn replace_status(&self, issuer: &IssuerRef, status: &IssuerStatus) -> Result<()> {
        // Merge patches replace arrays wholesale, so the conditions list is
        // written as a unit.
        let patch = serde_json::json!({ "status": status });
        let params = PatchParams::apply(CONTROLLER_NAME);

        match issuer.kind {
            IssuerKind::Issuer => {
                let namespace = issuer
                    .namespace
                    .as_deref()
                    .context("AWSPCAIssuer has no namespace")?;
                let api: Api<AWSPCAIssuer> = Api::namespaced(self.client.clone(), namespace);
                api.patch_status(&issuer.name, &params, &Patch::Merge(&patch))
                    .await
                    .with_context(|| format!("failed to update status of AWSPCAIssuer {issuer}"))?;
            }
            IssuerKind::ClusterIssuer => {
                let api: Api<AWSPCAClusterIssuer> = Api::all(self.client.clone());
                api.patch_status(&issuer.name, &params, &Patch::Merge(&patch))
                    .await
                    .with_context(|| {
                        format!("failed to update status of AWSPCAClusterIssuer {issuer}")
                    })?;
            }
        }

        debug!(genericissuer = %issuer, "Issuer status updated");
        Ok(())
    }
}
