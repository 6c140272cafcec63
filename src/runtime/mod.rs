//! # Runtime
//!
//! Process wiring around the reconciler.
//!
//! - `initialization`: rustls, tracing, metrics, HTTP server, Kubernetes client
//! - `watch_loop`: One controller per issuer kind, with a timeout per pass
//! - `error_policy`: Per-resource backoff for failed passes
//! - `context`: State shared by every reconciliation
//! - `backoff`: Exponential delay sequence

pub mod backoff;
pub mod context;
pub mod error_policy;
pub mod initialization;
pub mod watch_loop;
