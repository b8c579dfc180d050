//! Help-desk HTTP server.
//!
//! # Usage
//!
//! ```bash
//! PORT=8080 WORKER_THREADS=10 cargo run --bin server
//! ```
//!
//! # Example Requests
//!
//! ```bash
//! # Log in as the demo developer
//! curl -X POST http://localhost:8080/api/v1/auth/login \
//!   -H "Content-Type: application/json" -d '{"userID": 1}'
//!
//! # List tickets
//! curl http://localhost:8080/api/v1/tickets
//!
//! # Move a ticket along
//! curl -X PATCH http://localhost:8080/api/v1/tickets/1001/status \
//!   -H "Content-Type: application/json" -d '{"newStatus": "ASSIGNED"}'
//! ```

use anyhow::Context;
use ticketdesk_runtime::metrics::MetricsExporter;
use ticketdesk_server::{
    AppState, Config, DeskEnvironment, activity, build_router, build_store, metrics, seed,
};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},ticketdesk_server=debug", config.server.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.worker_threads)
        .thread_name("ticketdesk-worker")
        .enable_all()
        .build()
        .context("Failed to build the Tokio runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: Config) -> anyhow::Result<()> {
    info!(
        bind = %config.bind_address(),
        workers = config.server.worker_threads,
        metrics = config.metrics_enabled,
        seed = config.seed_demo_data,
        "Starting help-desk server"
    );

    let mut exporter = MetricsExporter::new();
    if config.metrics_enabled {
        exporter.install().context("Failed to install metrics exporter")?;
        metrics::register_desk_metrics();
    }

    let store = build_store(&config, DeskEnvironment::production());
    let activity_logger = activity::spawn(&store);

    if config.seed_demo_data {
        let count = seed::load(&store, config.request_timeout())
            .await
            .context("Failed to load demo data")?;
        info!(commands = count, "Demo data ready");
    }

    let state = AppState::new(store.clone(), config.request_timeout(), exporter);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("Server listening on http://{}", config.bind_address());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("HTTP server stopped, draining the store");
    if let Err(error) = store.shutdown(config.shutdown_timeout()).await {
        warn!(%error, "Store did not drain in time");
    }

    drop(store);
    activity_logger.abort();
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
