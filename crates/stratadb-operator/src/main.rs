//! StrataDB operator - cluster networking control process.
//!
//! This is the main entry point for the operator. Startup order:
//!
//! 1. Load and validate configuration (fatal on error)
//! 2. Open the bookkeeping store (fatal on error)
//! 3. Connect to the Kubernetes control plane (fatal on error)
//! 4. Start the management API as a background task
//! 5. Wait for one termination signal and exit with its classification
//!
//! # HTTP Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /v1/services` - List Services created through the operator
//! - `POST /v1/services` - Create a Service from a JSON manifest
//! - `DELETE /v1/services` - Delete a batch of Services, best-effort

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stratadb_kube::{KubeServiceClient, ServiceReconciler};
use stratadb_operator::{create_router, supervisor, OperatorConfig, OperatorState};
use stratadb_store::RocksStore;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stratadb=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StrataDB operator");

    let config = match OperatorConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!(error = %error, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        listen_addr = %config.listen_addr,
        namespace = %config.namespace,
        data_dir = %config.data_dir,
        "Configuration loaded"
    );

    let store = match RocksStore::open(&config.data_dir) {
        Ok(store) => Arc::new(store),
        Err(error) => {
            tracing::error!(error = %error, path = %config.data_dir, "Failed to open store");
            return ExitCode::FAILURE;
        }
    };

    let kube_client = match kube::Client::try_default().await {
        Ok(client) => client,
        Err(error) => {
            tracing::error!(error = %error, "Failed to connect to the Kubernetes control plane");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("Connected to Kubernetes cluster");

    let services = Arc::new(KubeServiceClient::new(kube_client, config.namespace.clone()));
    let reconciler = Arc::new(ServiceReconciler::new(services));

    let listen_addr = config.listen_addr.clone();
    let state = OperatorState::new(reconciler, store, config);
    let app = create_router(state);

    // The API server is a detached task; only the signal wait below
    // blocks the supervisor.
    tokio::spawn(async move {
        tracing::info!(listen_addr = %listen_addr, "Starting management API");
        match tokio::net::TcpListener::bind(&listen_addr).await {
            Ok(listener) => {
                if let Err(error) = axum::serve(listener, app).await {
                    tracing::error!(error = %error, "Management API exited");
                }
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    listen_addr = %listen_addr,
                    "Failed to bind management API"
                );
            }
        }
    });

    let signal = supervisor::wait_for_shutdown().await;
    tracing::info!(signal = signal.name(), "Received shutdown signal, exiting");
    ExitCode::from(signal.exit_code())
}
