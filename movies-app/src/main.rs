use std::sync::Arc;

use movies_app::settings::{DatabaseConfig, ServerConfig};
use movies_app::{state, AppState, TracingAuditLog};
use movies_core::MoviesConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    movies_core::init_tracing();

    let config = MoviesConfig::load("dev")?;
    let server: ServerConfig = config.section()?;
    let database: DatabaseConfig = config.section()?;

    let pool = state::connect(&database).await?;
    info!(url = %database.url, "Database ready");

    let app = movies_app::router(AppState::new(pool.clone(), Arc::new(TracingAuditLog)));

    let addr = server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, profile = config.profile(), "Movies server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown");
}
