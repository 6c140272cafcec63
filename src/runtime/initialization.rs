//! # Initialization
//!
//! Controller initialization logic including rustls setup, tracing, metrics,
//! server startup, and Kubernetes client setup.

use crate::config::ControllerConfig;
use crate::controller::events::KubeEventPublisher;
use crate::controller::reconciler::{GenericIssuerReconciler, KubeStatusWriter, ReconcilerSettings};
use crate::observability;
use crate::provider::{AwsConfigResolver, StsIdentityProber};
use crate::runtime::context::ControllerContext;
use crate::server::{start_server, ServerState};
use anyhow::{Context, Result};
use kube::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// How long to wait for the HTTP server to bind
const SERVER_STARTUP_TIMEOUT: Duration = Duration::from_secs(10);
const SERVER_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Initialization result containing all necessary components for the controller
pub struct InitializationResult {
    /// Kubernetes client
    pub client: Client,
    /// Reconciler context shared by both issuer kinds
    pub context: Arc<ControllerContext>,
    /// Server state for health checks
    pub server_state: Arc<ServerState>,
}

impl std::fmt::Debug for InitializationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitializationResult")
            .field("context", &self.context)
            .field("server_ready", &self.server_state.ready())
            .finish_non_exhaustive()
    }
}

/// Initialize the controller runtime
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Metrics registration
/// - HTTP server startup
/// - Kubernetes client creation
/// - Reconciler setup
pub async fn initialize(config: ControllerConfig) -> Result<InitializationResult> {
    // Must happen before any TLS connection is made
    let crypto_installed = rustls::crypto::ring::default_provider()
        .install_default()
        .is_ok();

    init_tracing(&config)?;
    if !crypto_installed {
        warn!("rustls crypto provider was already installed");
    }

    info!("Starting AWS Private CA issuer controller");
    info!(
        "Build info: timestamp={}, datetime={}, git_hash={}",
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_DATETIME"),
        env!("BUILD_GIT_HASH")
    );
    info!(
        default_region = config.aws_default_region.as_deref().unwrap_or_default(),
        get_caller_identity = config.get_caller_identity,
        namespace = %config.controller_namespace,
        "Controller configuration loaded"
    );

    observability::metrics::register_metrics()?;

    let server_state = Arc::new(ServerState::default());
    let server_state_clone = server_state.clone();
    let port = config.metrics_port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, server_state_clone).await {
            error!("HTTP server error: {}", e);
        }
    });
    wait_for_server_bind(port, &server_handle).await?;

    let client = Client::try_default()
        .await
        .context("Failed to create Kubernetes client")?;

    let reconciler = GenericIssuerReconciler::new(
        Arc::new(AwsConfigResolver::new(
            client.clone(),
            config.aws_default_region.clone(),
            config.controller_namespace.clone(),
        )),
        Arc::new(StsIdentityProber),
        Arc::new(KubeStatusWriter::new(client.clone())),
        Arc::new(KubeEventPublisher::new(client.clone())),
        ReconcilerSettings::from(&config),
    );
    let context = Arc::new(ControllerContext::new(reconciler, &config));

    server_state.set_ready(true);
    info!("Controller initialized, starting watch loops...");

    Ok(InitializationResult {
        client,
        context,
        server_state,
    })
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `LOG_LEVEL`; `LOG_FORMAT=json` selects JSON output.
fn init_tracing(config: &ControllerConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "aws_pca_issuer_controller={}",
            config.log_level.to_lowercase()
        ))
    });
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.log_format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))
}

/// Wait until the metrics port accepts connections
async fn wait_for_server_bind(
    port: u16,
    server_handle: &tokio::task::JoinHandle<()>,
) -> Result<()> {
    let start_time = Instant::now();
    loop {
        if server_handle.is_finished() {
            return Err(anyhow::anyhow!("HTTP server failed to start"));
        }

        if tokio::net::TcpStream::connect(("127.0.0.1", port))
            .await
            .is_ok()
        {
            info!("HTTP server is ready and accepting connections");
            return Ok(());
        }

        if start_time.elapsed() > SERVER_STARTUP_TIMEOUT {
            return Err(anyhow::anyhow!(
                "HTTP server failed to become ready within {} seconds",
                SERVER_STARTUP_TIMEOUT.as_secs()
            ));
        }

        tokio::time::sleep(SERVER_POLL_INTERVAL).await;
    }
}
