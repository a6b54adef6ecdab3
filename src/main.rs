use std::sync::Arc;

use anyhow::Context;
use ecowaste_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
    storage::{FileLocalStorage, StorageState},
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Starts the local app shell: configuration, logging, durable local storage, session
/// restoration, and the HTTP server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration. `.env` first so it can feed `AppConfig::load`.
    dotenv::dotenv().ok();
    let config = AppConfig::load().context("invalid configuration")?;

    // 2. Logging. RUST_LOG wins over the defaults below.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ecowaste_portal=debug,tower_http=info".into());

    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 3. Local storage backing the session snapshot.
    let storage = Arc::new(FileLocalStorage::new(config.storage_path.clone())) as StorageState;
    tracing::info!(path = %config.storage_path.display(), "using local storage file");

    // 4. State. Navigations answer with the loading page until restoration is done.
    let bind_addr = config.bind_addr;
    let app_state = AppState::new(config, storage);
    let session = app_state.session.clone();
    let restoring = session.clone();
    tokio::spawn(async move {
        restoring.restore().await;
    });

    // 5. Server.
    let app = create_router(app_state);
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    let local_addr = listener.local_addr()?;

    tracing::info!("Listening on {local_addr}");
    tracing::info!("API Documentation (Swagger UI) available at: http://{local_addr}/swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    session.teardown().await;
    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
