use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use musebot_events::CallbackDelivery;
use tokio_util::task::TaskTracker;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use musebot_worker::config::WorkerConfig;
use musebot_worker::routes;
use musebot_worker::state::WorkerState;

/// How long in-flight jobs get to finish after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musebot_worker=debug,musebot_events=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = WorkerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded worker configuration");

    let pool = musebot_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    musebot_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!(database_url = %config.database_url, "Database ready");

    let tasks = TaskTracker::new();
    let state = WorkerState {
        pool,
        delivery: Arc::new(CallbackDelivery::new(reqwest::Client::new())),
        default_callback_url: Arc::from(config.callback_url.as_str()),
        tasks: tasks.clone(),
    };

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting worker");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tasks.close();
    tracing::info!(in_flight = tasks.len(), "Draining in-flight jobs");
    if tokio::time::timeout(DRAIN_TIMEOUT, tasks.wait()).await.is_err() {
        tracing::warn!("Jobs still running after drain timeout, exiting anyway");
    }
    tracing::info!("Worker stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
