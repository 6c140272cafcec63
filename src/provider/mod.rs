//! # Provider
//!
//! Seams between the reconciler and the cloud provider.
//!
//! - [`ConfigResolver`] turns an issuer spec into an authenticated client configuration
//! - [`IdentityProber`] confirms that configuration is live
//!
//! Production implementations live in [`aws`]; tests plug in fakes.

pub mod aws;

use crate::crd::{AwsPcaIssuerSpec, IssuerRef};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_credential_types::provider::error::CredentialsError;
use thiserror::Error;

pub use aws::{AwsConfigResolver, StsIdentityProber};

/// Authenticated AWS client configuration for a single reconciliation pass.
///
/// Created fresh on every pass and dropped at its end.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    sdk_config: SdkConfig,
}

impl ResolvedConfig {
    #[must_use]
    pub fn new(sdk_config: SdkConfig) -> Self {
        Self { sdk_config }
    }

    #[must_use]
    pub fn sdk_config(&self) -> &SdkConfig {
        &self.sdk_config
    }

    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.sdk_config.region().map(AsRef::as_ref)
    }
}

/// Resolution failures. The message always carries the underlying cause.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error("no Region found in Issuer Spec")]
    NoRegion,
    #[error("failed to retrieve AWS secret {namespace}/{name}: {source}")]
    SecretFetch {
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },
    #[error("{key} not found in secret {namespace}/{name}")]
    MissingSecretKey {
        key: String,
        namespace: String,
        name: String,
    },
    #[error("{key} in secret {namespace}/{name} is not valid UTF-8")]
    InvalidSecretValue {
        key: String,
        namespace: String,
        name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("failed to assume role {role_arn}: {detail}")]
    RoleAssumption {
        role_arn: String,
        detail: String,
        #[source]
        source: CredentialsError,
    },
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Identity-introspection failure
#[derive(Debug, Error)]
#[error("failed to sts.GetCallerIdentity: {0}")]
pub struct ProbeError(#[source] pub anyhow::Error);

/// Identity returned by the probe
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerIdentity {
    pub arn: Option<String>,
    pub account: Option<String>,
    pub user_id: Option<String>,
}

/// Builds an authenticated client configuration from an issuer spec
#[async_trait]
pub trait ConfigResolver: Send + Sync {
    /// Resolve credentials and region for `issuer`.
    ///
    /// May perform network round trips (secret reads, STS). Must not mutate the issuer.
    async fn resolve(
        &self,
        issuer: &IssuerRef,
        spec: &AwsPcaIssuerSpec,
    ) -> Result<ResolvedConfig, ResolutionError>;
}

/// Read-only "who am I" check against a resolved configuration
#[async_trait]
pub trait IdentityProber: Send + Sync {
    async fn probe(&self, config: &ResolvedConfig) -> Result<CallerIdentity, ProbeError>;
}
