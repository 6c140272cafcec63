//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ```rust
//! use aws_pca_issuer_controller::prelude::*;
//! ```

// CRD types
pub use crate::crd::*;

// Provider seams
pub use crate::provider::{
    CallerIdentity, ConfigResolver, IdentityProber, ProbeError, ResolutionError, ResolvedConfig,
};

// Reconciler types
pub use crate::controller::events::EventPublisher;
pub use crate::controller::reconciler::{
    GenericIssuerReconciler, ReconcileError, ReconcilerSettings, StatusWriter, ValidationError,
};

// Config types
pub use crate::config::ControllerConfig;
