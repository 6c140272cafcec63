//! AWS Private CA Issuer Controller Library
//!
//! Core of the controller that verifies cert-manager issuers backed by
//! AWS Private Certificate Authority.
//!
//! ## Quick Start
//!
//! ```rust
//! use aws_pca_issuer_controller::prelude::*;
//! ```
//!
//! This brings commonly used types and traits into scope. For more specific imports,
//! use the individual modules.

pub mod config;
pub mod constants;
pub mod controller;
pub mod crd;
pub mod observability;
pub mod prelude;
pub mod provider;
pub mod runtime;
pub mod server;
