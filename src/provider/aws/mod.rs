//! # AWS Provider
//!
//! - `auth.rs` - credential chain, secret-based keys and role assumption
//! - `identity.rs` - `sts:GetCallerIdentity` probe

mod auth;
mod identity;

pub use auth::{credentials_from_secret, AwsConfigResolver};
pub use identity::StsIdentityProber;
