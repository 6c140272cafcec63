//! # Validation
//!
//! Checks an issuer spec for completeness before any network call.

use crate::crd::AwsPcaIssuerSpec;
use thiserror::Error;

/// Incomplete issuer spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no Arn found in Issuer Spec")]
    MissingAuthorityIdentifier,
    #[error("no Region found in Issuer Spec")]
    MissingRegion,
}

/// Validate an issuer spec.
///
/// Rules are checked in order and the first failure wins:
/// 1. `arn` must be non-empty
/// 2. a region must come from the spec or from `default_region`
///
/// # Errors
///
/// Returns the first rule that fails.
pub fn validate_issuer(
    spec: &AwsPcaIssuerSpec,
    default_region: Option<&str>,
) -> Result<(), ValidationError> {
    if spec.arn.is_empty() {
        return Err(ValidationError::MissingAuthorityIdentifier);
    }
    if spec.effective_region(default_region).is_none() {
        return Err(ValidationError::MissingRegion);
    }
    Ok(())
}
