//! # Caller Identity
//!
//! Confirms resolved credentials are live with a single `sts:GetCallerIdentity` call.

use crate::provider::{CallerIdentity, IdentityProber, ProbeError, ResolvedConfig};
use async_trait::async_trait;
use aws_sdk_sts::error::DisplayErrorContext;

/// Production [`IdentityProber`] using AWS STS
#[derive(Debug, Clone, Copy, Default)]
pub struct StsIdentityProber;

#[async_trait]
impl IdentityProber for StsIdentityProber {
    async fn probe(&self, config: &ResolvedConfig) -> Result<CallerIdentity, ProbeError> {
        let client = aws_sdk_sts::Client::new(config.sdk_config());
        let output = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| ProbeError(anyhow::anyhow!("{}", DisplayErrorContext(&e))))?;

        Ok(CallerIdentity {
            arn: output.arn().map(str::to_string),
            account: output.account().map(str::to_string),
            user_id: output.user_id().map(str::to_string),
        })
    }
}
