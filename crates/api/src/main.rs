use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use condo_api::config::ServerConfig;
use condo_api::notifications::{NotificationWriter, NotifierConfig};
use condo_api::router::build_app_router;
use condo_api::state::AppState;
use condo_db::StoreConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "condo_api=debug,condo_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store_config = StoreConfig::from_env();
    let (store, store_mode) =
        condo_db::open_store(&store_config).expect("Failed to open the data store");
    tracing::info!(?store_mode, "Data store ready");

    // --- Notification writer ---
    let notifier = NotificationWriter::new(NotifierConfig::from_env());
    if !notifier.is_configured() {
        tracing::warn!("NOTIFIER_API_KEY not set, notifications will use the fixed template");
    }

    // --- App state ---
    let state = AppState {
        store,
        store_mode,
        config: Arc::new(config.clone()),
        notifier: Arc::new(notifier),
    };

    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // Once a signal arrives, in-flight requests get `shutdown_timeout_secs` to drain.
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    let signalled = Arc::new(Notify::new());
    let notify = Arc::clone(&signalled);
    let mut server = tokio::spawn(
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                notify.notify_one();
            })
            .into_future(),
    );

    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
        }
        () = signalled.notified() => {
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => result.expect("Server task panicked").expect("Server error"),
                Err(_) => tracing::warn!(drain_secs = drain.as_secs(), "Drain timeout elapsed, dropping remaining connections"),
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
