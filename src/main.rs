use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roombook::interface::{BookingInterface, Clock};
use roombook::server;
use roombook::settings::Settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::var("ROOMBOOK_CONFIG").ok();
    let settings = Settings::load(config_path.as_deref())?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let rooms = settings.room_keeper();
    info!(rooms = rooms.len(), "catalog loaded");
    let interface = Arc::new(BookingInterface::new(rooms, Clock::System));

    let addr = settings.address();
    let listener = TcpListener::bind(&addr).await?;
    info!("roombook listening on {addr}");

    axum::serve(listener, server::router(interface))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("roombook stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!("failed to register SIGTERM handler: {e}");
                ctrl_c.await.ok();
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
    info!("shutdown signal received");
}
