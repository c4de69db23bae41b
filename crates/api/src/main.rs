use std::net::SocketAddr;
use std::sync::Arc;

use remindcare_core::roles::ROLE_DOCTOR;
use remindcare_db::models::staff::CreateStaff;
use remindcare_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remindcare_api::app::build_app;
use remindcare_api::auth::password::hash_password;
use remindcare_api::config::ServerConfig;
use remindcare_api::state::AppState;

const DEFAULT_LOG_FILTER: &str = "remindcare_api=debug,remindcare_db=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        token_expiry_mins = config.jwt.access_token_expiry_mins,
        "Loaded server configuration"
    );

    let state = AppState {
        pool: seed_pool(&config),
        config: Arc::new(config),
    };
    let addr = SocketAddr::new(
        state.config.host.parse().expect("HOST must be an IP address"),
        state.config.port,
    );
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "RemindCare API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Demo roster and reminder queue, plus the one doctor account staff sign
/// in with.
fn seed_pool(config: &ServerConfig) -> DbPool {
    let password_hash =
        hash_password(&config.demo.password).expect("Failed to hash demo account password");

    let pool = remindcare_db::create_pool(vec![CreateStaff {
        name: config.demo.name.clone(),
        email: config.demo.email.clone(),
        role: ROLE_DOCTOR.to_string(),
        password_hash,
    }]);
    tracing::info!(email = %config.demo.email, "Demo staff account ready");
    pool
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!(signal = "SIGINT", "Shutting down"),
        () = terminate => tracing::info!(signal = "SIGTERM", "Shutting down"),
    }
}
