//! # Issuer Spec
//!
//! The two issuer kinds and the spec they share.

use serde::{Deserialize, Serialize};

/// Secret key holding the AWS access key ID when no selector is given
pub const DEFAULT_ACCESS_KEY_ID_KEY: &str = "AWS_ACCESS_KEY_ID";

/// Secret key holding the AWS secret access key when no selector is given
pub const DEFAULT_SECRET_ACCESS_KEY_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// AWSPCAIssuer Custom Resource Definition
///
/// A namespaced issuer backed by an AWS Private Certificate Authority.
///
/// # Example
///
/// ```yaml
/// apiVersion: awspca.cert-manager.io/v1beta1
/// kind: AWSPCAIssuer
/// metadata:
///   name: pca-issuer
///   namespace: default
/// spec:
///   arn: arn:aws:acm-pca:us-east-1:111111111111:certificate-authority/abc
///   region: us-east-1
///   role: arn:aws:iam::222222222222:role/pca-issuer
/// ```
#[derive(
    kube::CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[kube(
    kind = "AWSPCAIssuer",
    group = "awspca.cert-manager.io",
    version = "v1beta1",
    namespaced,
    status = "crate::crd::IssuerStatus",
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}, {"name":"Reason", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].reason"}"#
)]
#[serde(rename_all = "camelCase")]
pub struct AwsPcaIssuerSpec {
    /// ARN of the private certificate authority used for signing
    #[serde(default)]
    pub arn: String,
    /// AWS region of the certificate authority.
    /// Falls back to the controller's `AWS_REGION` when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// IAM role ARN to assume before talking to the certificate authority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Kubernetes secret holding static AWS credentials.
    /// When omitted the ambient credential chain (IRSA, instance profile, env) is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<AwsCredentialsSecretReference>,
}

/// AWSPCAClusterIssuer Custom Resource Definition
///
/// Cluster-scoped counterpart of [`AWSPCAIssuer`] with an identical spec.
#[derive(
    kube::CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema,
)]
#[kube(
    kind = "AWSPCAClusterIssuer",
    group = "awspca.cert-manager.io",
    version = "v1beta1",
    status = "crate::crd::IssuerStatus",
    printcolumn = r#"{"name":"Ready", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].status"}, {"name":"Reason", "type":"string", "jsonPath":".status.conditions[?(@.type==\"Ready\")].reason"}"#
)]
pub struct AwsPcaClusterIssuerSpec {
    #[serde(flatten)]
    pub issuer: AwsPcaIssuerSpec,
}

impl AwsPcaIssuerSpec {
    /// Region from the spec, falling back to the process default.
    /// Empty strings count as unset on both sides.
    #[must_use]
    pub fn effective_region<'a>(&'a self, default_region: Option<&'a str>) -> Option<&'a str> {
        self.region
            .as_deref()
            .filter(|region| !region.is_empty())
            .or_else(|| default_region.filter(|region| !region.is_empty()))
    }

    /// Role ARN to assume, if one is configured
    #[must_use]
    pub fn role_arn(&self) -> Option<&str> {
        self.role.as_deref().filter(|role| !role.is_empty())
    }

    /// Secret reference, if it names a secret
    #[must_use]
    pub fn credentials_secret(&self) -> Option<&AwsCredentialsSecretReference> {
        self.secret_ref.as_ref().filter(|r| !r.name.is_empty())
    }
}

impl From<AwsPcaIssuerSpec> for AwsPcaClusterIssuerSpec {
    fn from(issuer: AwsPcaIssuerSpec) -> Self {
        Self { issuer }
    }
}

/// Reference to a secret containing an access key pair
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsCredentialsSecretReference {
    /// Secret name. An empty name disables secret-based credentials.
    #[serde(default)]
    pub name: String,
    /// Secret namespace. Defaults to the issuer's namespace, or the
    /// controller namespace for cluster issuers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Selects the key holding the access key ID
    #[serde(
        default,
        rename = "accessKeyIDSelector",
        skip_serializing_if = "Option::is_none"
    )]
    pub access_key_id_selector: Option<SecretKeySelector>,
    /// Selects the key holding the secret access key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_access_key_selector: Option<SecretKeySelector>,
}

impl AwsCredentialsSecretReference {
    /// Key of the access key ID within the secret
    #[must_use]
    pub fn access_key_id_key(&self) -> &str {
        selected_key(self.access_key_id_selector.as_ref(), DEFAULT_ACCESS_KEY_ID_KEY)
    }

    /// Key of the secret access key within the secret
    #[must_use]
    pub fn secret_access_key_key(&self) -> &str {
        selected_key(
            self.secret_access_key_selector.as_ref(),
            DEFAULT_SECRET_ACCESS_KEY_KEY,
        )
    }
}

fn selected_key<'a>(selector: Option<&'a SecretKeySelector>, default: &'a str) -> &'a str {
    selector
        .map(|s| s.key.as_str())
        .filter(|key| !key.is_empty())
        .unwrap_or(default)
}

/// Selects a single key within a secret.
/// The secret itself is always the one named by the enclosing `secretRef`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, schemars::JsonSchema)]
pub struct SecretKeySelector {
    /// Accepted for compatibility with core `SecretKeySelector` manifests, not consulted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub key: String,
}
