use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use vault_core::Config;
use vault_core::storage::LocalStore;
use vault_server::{AppState, metrics, router};

#[derive(Parser)]
#[command(name = "vault-server", about = "Authenticated file vault in front of an object store")]
struct Cli {
    /// Address to bind to (overrides VAULT_BIND)
    #[arg(long)]
    bind: Option<String>,

    /// Address for health and metrics endpoints (overrides VAULT_OPS_BIND)
    #[arg(long)]
    ops_bind: Option<String>,

    /// Data directory (overrides VAULT_DATA_DIR)
    #[arg(long)]
    data_dir: Option<String>,

    /// Metadata directory (overrides VAULT_METADATA_DIR)
    #[arg(long)]
    metadata_dir: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut config = Config::from_env();

    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(ops_bind) = cli.ops_bind {
        config.ops_bind = ops_bind;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir.into();
    }
    if let Some(metadata_dir) = cli.metadata_dir {
        config.metadata_dir = metadata_dir.into();
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    if config.credentials_overlap() {
        tracing::warn!(
            "Admin and guest credentials are identical; every login will resolve to admin"
        );
    }

    std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");
    std::fs::create_dir_all(&config.metadata_dir).expect("Failed to create metadata directory");

    let store = LocalStore::open(&config.data_dir, &config.metadata_dir)
        .expect("Failed to open object store");

    let state = Arc::new(AppState {
        config: config.clone(),
        store: Arc::new(store.clone()),
        start_time: Instant::now(),
        metrics_handle: metrics::init_metrics(),
    });

    let app = router::build_router(state.clone());
    let ops_app = router::build_ops_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .expect("Failed to bind");
    let ops_listener = tokio::net::TcpListener::bind(&config.ops_bind)
        .await
        .expect("Failed to bind ops listener");
    tracing::info!("vault listening on {}", config.bind);
    tracing::info!("ops endpoints listening on {}", config.ops_bind);

    let ops_server = tokio::spawn(async move {
        if let Err(e) = axum::serve(ops_listener, ops_app).await {
            tracing::error!(error = %e, "Ops server error");
        }
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    ops_server.abort();
    if let Err(e) = store.metadata().flush() {
        tracing::error!(error = %e, "Failed to flush metadata on shutdown");
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
