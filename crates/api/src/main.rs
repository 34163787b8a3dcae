use std::net::SocketAddr;
use std::sync::Arc;

use musebot_core::ResultStore;
use musebot_llm::LlmClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use musebot_api::config::ServerConfig;
use musebot_api::router::build_app_router;
use musebot_api::state::AppState;
use musebot_api::dispatch;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musebot_api=debug,musebot_worker=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        queue_enabled = config.queue_enabled,
        llm_configured = config.llm.is_some(),
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = musebot_db::create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    musebot_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    if config.run_migrations {
        musebot_db::run_migrations(&pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied");
    }

    // --- Services ---
    let http = reqwest::Client::new();
    let results = Arc::new(ResultStore::new());
    let dispatcher = dispatch::from_config(&config, pool.clone(), Arc::clone(&results), http.clone());
    let llm = config
        .llm
        .clone()
        .map(|llm_config| Arc::new(LlmClient::with_client(http, llm_config)));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        results,
        dispatcher,
        llm,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM.
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
