//! # Reconciler
//!
//! Issuer validation and status reconciliation.
//!
//! - `validation.rs` - Spec completeness checks
//! - `status.rs` - Ready condition bookkeeping and the status write
//! - `reconcile.rs` - The reconciliation pass
//! - `types.rs` - Reconciler, settings and error types

mod reconcile;
pub mod status;
mod types;
pub mod validation;

pub use status::{set_issuer_condition, KubeStatusWriter, StatusWriter};
pub use types::{GenericIssuerReconciler, ReconcileError, ReconcilerSettings};
pub use validation::{validate_issuer, ValidationError};
