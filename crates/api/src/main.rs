use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wayfarer_api::auth::bootstrap::ensure_bootstrap_admin;
use wayfarer_api::config::ServerConfig;
use wayfarer_api::router::build_app_router;
use wayfarer_api::state::AppState;
use wayfarer_events::{EventBus, EventLogger};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = wayfarer_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    wayfarer_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    wayfarer_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready, migrations applied");

    if let Some(account) = &config.bootstrap_admin {
        ensure_bootstrap_admin(&pool, account)
            .await
            .expect("Failed to create bootstrap admin");
    }

    // --- Admin events ---
    let event_bus = Arc::new(EventBus::default());
    let logger_handle = tokio::spawn(EventLogger::run(event_bus.subscribe()));

    let config = Arc::new(config);
    let state = AppState {
        pool,
        config: Arc::clone(&config),
        event_bus: Arc::clone(&event_bus),
    };
    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // The router owned the remaining bus handles; dropping ours closes the
    // channel and lets the logger drain.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, logger_handle).await.is_err() {
        tracing::warn!("Event logger did not stop in time");
    }

    tracing::info!("Graceful shutdown complete");
}

/// `LOG_FORMAT=json` switches to JSON lines; the filter comes from
/// `RUST_LOG`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wayfarer_api=debug,wayfarer_events=info,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
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
