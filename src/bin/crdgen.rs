//! # CRD Generator
//!
//! Prints the `AWSPCAIssuer` and `AWSPCAClusterIssuer` CustomResourceDefinitions
//! as a multi-document YAML stream.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin crdgen > config/crd/awspca.cert-manager.io.yaml
//!
//! cargo run --bin crdgen | kubectl apply -f -
//! ```

use anyhow::{Context, Result};
use aws_pca_issuer_controller::crd::{AWSPCAClusterIssuer, AWSPCAIssuer};
use kube::core::CustomResourceExt;

fn main() -> Result<()> {
    let issuer = serde_yaml::to_string(&AWSPCAIssuer::crd())
        .context("Failed to serialize AWSPCAIssuer CRD")?;
    let cluster_issuer = serde_yaml::to_string(&AWSPCAClusterIssuer::crd())
        .context("Failed to serialize AWSPCAClusterIssuer CRD")?;

    print!("{issuer}---\n{cluster_issuer}");
    Ok(())
}
