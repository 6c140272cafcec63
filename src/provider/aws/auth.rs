//! # AWS Authentication
//!
//! Builds the AWS SDK configuration for an issuer.
//!
//! Credentials are layered, lowest priority first:
//! 1. the SDK default chain (env, IRSA web identity, instance profile)
//! 2. static keys from the issuer's `secretRef`
//! 3. an assumed role when the issuer sets `role`

use crate::constants::{ASSUME_ROLE_SESSION_NAME, CONTROLLER_NAME};
use crate::crd::{AwsCredentialsSecretReference, AwsPcaIssuerSpec, IssuerRef};
use crate::provider::{ConfigResolver, ResolutionError, ResolvedConfig};
use async_trait::async_trait;
use aws_config::sts::AssumeRoleProvider;
use aws_config::{AppName, BehaviorVersion, Region, SdkConfig};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_credential_types::Credentials;
use aws_sdk_sts::error::DisplayErrorContext;
use k8s_openapi::api::core::v1::Secret;
use kube::Api;
use tracing::{debug, info};
use zeroize::Zeroizing;

/// Provider name attached to credentials read from a Kubernetes secret
const SECRET_CREDENTIALS_PROVIDER: &str = "KubernetesSecret";

/// Production [`ConfigResolver`] backed by `aws-config` and the Kubernetes API
#[derive(Clone)]
pub struct AwsConfigResolver {
    client: kube::Client,
    default_region: Option<String>,
    controller_namespace: String,
}

impl std::fmt::Debug for AwsConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsConfigResolver")
            .field("default_region", &self.default_region)
            .field("controller_namespace", &self.controller_namespace)
            .finish_non_exhaustive()
    }
}

impl AwsConfigResolver {
    #[must_use]
    pub fn new(
        client: kube::Client,
        default_region: Option<String>,
        controller_namespace: String,
    ) -> Self {
        Self {
            client,
            default_region,
            controller_namespace,
        }
    }

    /// Read static credentials from the referenced secret
    async fn load_secret_credentials(
        &self,
        issuer: &IssuerRef,
        secret_ref: &AwsCredentialsSecretReference,
    ) -> Result<Credentials, ResolutionError> {
        let namespace = secret_ref
            .namespace
            .as_deref()
            .filter(|ns| !ns.is_empty())
            .or(issuer.namespace.as_deref())
            .unwrap_or(&self.controller_namespace);

        debug!(
            genericissuer = %issuer,
            secret = %format!("{namespace}/{}", secret_ref.name),
            "Loading AWS credentials from secret"
        );

        let secrets: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
        let secret =
            secrets
                .get(&secret_ref.name)
                .await
                .map_err(|source| ResolutionError::SecretFetch {
                    namespace: namespace.to_string(),
                    name: secret_ref.name.clone(),
                    source,
                })?;

        credentials_from_secret(&secret, secret_ref, namespace)
    }
}

#[async_trait]
impl ConfigResolver for AwsConfigResolver {
    async fn resolve(
        &self,
        issuer: &IssuerRef,
        spec: &AwsPcaIssuerSpec,
    ) -> Result<ResolvedConfig, ResolutionError> {
        let region = spec
            .effective_region(self.default_region.as_deref())
            .ok_or(ResolutionError::NoRegion)?
            .to_string();

        let static_credentials = match spec.credentials_secret() {
            Some(secret_ref) => Some(self.load_secret_credentials(issuer, secret_ref).await?),
            None => None,
        };

        let base = load_base_config(&region, static_credentials).await?;

        let sdk_config = match spec.role_arn() {
            Some(role_arn) => {
                info!(genericissuer = %issuer, role = %role_arn, "Assuming IAM role");
                assume_role(base, &region, role_arn).await?
            }
            None => base,
        };

        Ok(ResolvedConfig::new(sdk_config))
    }
}

/// Load the default chain for `region`, overridden by static credentials when given
async fn load_base_config(
    region: &str,
    static_credentials: Option<Credentials>,
) -> Result<SdkConfig, ResolutionError> {
    let app_name = AppName::new(CONTROLLER_NAME)
        .map_err(|e| ResolutionError::Other(anyhow::Error::new(e)))?;

    let mut builder = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .app_name(app_name);

    if let Some(credentials) = static_credentials {
        builder = builder.credentials_provider(credentials);
    }

    Ok(builder.load().await)
}

/// Exchange the base credentials for the role's temporary credentials.
///
/// Credentials are fetched once here so a denied assumption fails the pass
/// instead of surfacing on first use.
async fn assume_role(
    base: SdkConfig,
    region: &str,
    role_arn: &str,
) -> Result<SdkConfig, ResolutionError> {
    let provider = AssumeRoleProvider::builder(role_arn)
        .session_name(ASSUME_ROLE_SESSION_NAME)
        .region(Region::new(region.to_string()))
        .configure(&base)
        .build()
        .await;

    provider
        .provide_credentials()
        .await
        .map_err(|source| ResolutionError::RoleAssumption {
            role_arn: role_arn.to_string(),
            detail: DisplayErrorContext(&source).to_string(),
            source,
        })?;

    Ok(base
        .into_builder()
        .credentials_provider(SharedCredentialsProvider::new(provider))
        .build())
}

/// Extract the access key pair from a secret
///
/// # Errors
///
/// Fails when either key is absent or not UTF-8.
pub fn credentials_from_secret(
    secret: &Secret,
    secret_ref: &AwsCredentialsSecretReference,
    namespace: &str,
) -> Result<Credentials, ResolutionError> {
    let access_key_id = read_secret_key(
        secret,
        secret_ref,
        namespace,
        secret_ref.access_key_id_key(),
    )?;
    let secret_access_key = read_secret_key(
        secret,
        secret_ref,
        namespace,
        secret_ref.secret_access_key_key(),
    )?;

    Ok(Credentials::new(
        access_key_id.as_str(),
        secret_access_key.as_str(),
        None,
        None,
        SECRET_CREDENTIALS_PROVIDER,
    ))
}

fn read_secret_key(
    secret: &Secret,
    secret_ref: &AwsCredentialsSecretReference,
    namespace: &str,
    key: &str,
) -> Result<Zeroizing<String>, ResolutionError> {
    let bytes = secret
        .data
        .as_ref()
        .and_then(|data| data.get(key))
        .ok_or_else(|| ResolutionError::MissingSecretKey {
            key: key.to_string(),
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
        })?;

    String::from_utf8(bytes.0.clone())
        .map(Zeroizing::new)
        .map_err(|source| ResolutionError::InvalidSecretValue {
            key: key.to_string(),
            namespace: namespace.to_string(),
            name: secret_ref.name.clone(),
            source,
        })
}
