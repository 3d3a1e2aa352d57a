use clap::Args;
use kitchen_config::Config;
use kitchen_core::Kitchen;
use kitchen_storage::{open_store, BuiltinStorageType};

use crate::http::{self, AppState};

#[derive(Args, Debug)]
pub struct Command {
    /// Socket address to bind, overrides `server.listen`
    #[arg(long)]
    listen: Option<String>,

    /// Directory of static files, overrides `server.static_dir`
    #[arg(long)]
    static_dir: Option<String>,

    /// Keep every record in memory, nothing is persisted
    #[arg(long)]
    in_memory: bool,
}

pub async fn handle(command: Command, config: Config) -> eyre::Result<()> {
    let storage_type = if command.in_memory {
        BuiltinStorageType::InMemory
    } else {
        BuiltinStorageType::parse(config.storage.get_backend())?
    };
    let store = open_store(storage_type, &config.storage.get_storage_location())?;

    let listen = command.listen.unwrap_or_else(|| config.server.get_listen());
    let static_dir = match command.static_dir {
        Some(dir) => Some(shellexpand::tilde(&dir).into_owned().into()),
        None => config.server.get_static_dir(),
    };

    let state = AppState {
        kitchen: Kitchen::new(store),
    };
    let app = http::router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .map_err(|e| eyre::eyre!("Couldn't bind to '{listen}': {e}"))?;
    tracing::info!(address = %listener.local_addr()?, "Server listening. Press Ctrl-C to exit.");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, server stopped.");
    Ok(())
}

/// Waits for a shutdown signal (Ctrl-C or SIGTERM).
async fn wait_for_shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
