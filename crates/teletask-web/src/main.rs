//! teletask – entry point.
//!
//! Startup order:
//! 1. Parse command-line arguments and load the configuration.
//! 2. Initialise structured tracing.
//! 3. Open the SQLite database and run pending migrations.
//! 4. Build the Axum router and start the HTTP server with graceful shutdown.

mod config;
mod error;
mod flash;
mod forms;
mod routes;
mod state;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use crate::config::{Cli, Config};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration, with command-line flags taking precedence.
    let cli = Cli::parse();
    let mut config = Config::new(&cli.config)?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(database_url) = cli.database_url {
        config.database_url = database_url;
    }

    // 2. Tracing. RUST_LOG wins over the configured level; an invalid value
    // is reported on stderr because the subscriber is not up yet.
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "WARN: log_level '{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    config.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    info!(version = env!("CARGO_PKG_VERSION"), "teletask starting");

    // 3. Database.
    let pool = teletask_core::db::establish_connection(&config.database_url).await?;
    info!(database_url = %config.database_url, "database ready");

    // 4. HTTP server with graceful shutdown.
    let addr: SocketAddr = config.bind_address.parse()?;
    let state = Arc::new(AppState::new(config, pool)?);
    let app = routes::build(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("teletask stopped");
    Ok(())
}

/// Returns a future that resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
            std::future::pending::<()>().await
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
