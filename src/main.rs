//! # AWS Private CA Issuer Controller
//!
//! Keeps the `Ready` condition of `AWSPCAIssuer` and `AWSPCAClusterIssuer`
//! resources in line with whether their AWS configuration can be resolved.
//!
//! ## Overview
//!
//! For each issuer the controller:
//!
//! 1. **Validates the spec** - a Private CA ARN and a region (spec or `AWS_REGION`) are required
//! 2. **Resolves credentials** - default chain, optional secret keys, optional role assumption
//! 3. **Optionally probes identity** - `sts:GetCallerIdentity` when `GET_CALLER_IDENTITY` is set
//! 4. **Writes status** - `Ready` condition plus a matching Kubernetes Event
//!
//! Failed passes are retried with a per-issuer exponential backoff.

use anyhow::Result;
use aws_pca_issuer_controller::config::ControllerConfig;
use aws_pca_issuer_controller::runtime::initialization::initialize;
use aws_pca_issuer_controller::runtime::watch_loop::run_watch_loops;
use clap::Parser;
use tracing::info;

/// AWS Private CA issuer controller
#[derive(Parser, Debug)]
#[command(name = "aws-pca-issuer-controller", version, about, long_about = None)]
struct Args {
    /// Port for the metrics and probe endpoints (overrides `METRICS_PORT`)
    #[arg(long)]
    metrics_port: Option<u16>,

    /// Call sts:GetCallerIdentity after resolving credentials (overrides `GET_CALLER_IDENTITY`)
    #[arg(long)]
    get_caller_identity: Option<bool>,
}

impl Args {
    fn apply(self, mut config: ControllerConfig) -> ControllerConfig {
        if let Some(port) = self.metrics_port {
            config.metrics_port = port;
        }
        if let Some(probe) = self.get_caller_identity {
            config.get_caller_identity = probe;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Args::parse().apply(ControllerConfig::from_env());

    let init = initialize(config).await?;

    run_watch_loops(init.client, init.context).await;

    init.server_state.set_ready(false);
    info!("Controller stopped");
    Ok(())
}
