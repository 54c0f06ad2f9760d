use self_rating::{AppState, Config, JsonFileStore, router};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let store = Arc::new(JsonFileStore::new(&config.data_path));
    let state = AppState::load(store, config.undo_window)
        .await
        .inspect_err(|err| error!("cannot start with {}: {err}", config.data_path.display()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        "listening on http://{addr} (data: {}, undo window: {:?})",
        config.data_path.display(),
        config.undo_window
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
}
