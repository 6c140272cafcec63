//! # Controller
//!
//! Core controller modules for the AWS Private CA issuer controller.
//!
//! - `events`: Kubernetes Event publishing
//! - `reconciler`: Issuer validation and status reconciliation

pub mod events;
pub mod reconciler;
