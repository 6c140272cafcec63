//! # Custom Resource Definitions
//!
//! CRD types for the AWS Private CA issuer controller.
//!
//! ## Module Structure
//!
//! - `spec.rs` - `AWSPCAIssuer` / `AWSPCAClusterIssuer` kinds and their shared spec
//! - `status.rs` - Status and condition types
//! - `issuer.rs` - `GenericIssuer` capability trait implemented by both kinds

mod issuer;
mod spec;
mod status;

pub use issuer::{GenericIssuer, IssuerKind, IssuerRef};
pub use spec::{
    AWSPCAClusterIssuer, AWSPCAIssuer, AwsCredentialsSecretReference, AwsPcaClusterIssuerSpec,
    AwsPcaIssuerSpec, SecretKeySelector, DEFAULT_ACCESS_KEY_ID_KEY, DEFAULT_SECRET_ACCESS_KEY_KEY,
};
pub use status::{
    ConditionStatus, IssuerCondition, IssuerStatus, CONDITION_TYPE_READY,
};
