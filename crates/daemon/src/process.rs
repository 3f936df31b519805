//! Process lifecycle: logging, state creation, serve, graceful shutdown.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::{Config, DEV_TOKEN_SECRET};
use crate::http_server;
use crate::ServiceState;

const FINAL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Initialize logging. Returns guards that must be kept alive for the
/// duration of the program.
fn init_logging(config: &Config) -> Vec<tracing_appender::non_blocking::WorkerGuard> {
    let mut guards = Vec::new();

    // Stdout layer
    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(stdout_guard);

    let stdout_env_filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(stdout_writer)
        .with_filter(stdout_env_filter);

    // File layer (if log_dir is set)
    if let Some(log_dir) = &config.log_dir {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: Failed to create log directory {:?}: {}", log_dir, e);
        }

        let file_appender = tracing_appender::rolling::daily(log_dir, "ergond.log");
        let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);

        let file_env_filter = EnvFilter::builder()
            .with_default_directive(config.log_level.into())
            .from_env_lossy();

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .with_filter(file_env_filter);

        tracing_subscriber::registry()
            .with(stdout_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry().with(stdout_layer).init();
    }

    guards
}

/// Run the daemon until ctrl-c, exiting the process on unrecoverable setup
/// errors.
pub async fn run(config: Config) {
    let _guards = init_logging(&config);

    if config.token_secret == DEV_TOKEN_SECRET {
        tracing::warn!("running with the built-in development token secret; set ERGON_TOKEN_SECRET");
    }

    let state = match ServiceState::from_config(&config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("error creating server state: {}", e);
            std::process::exit(3);
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(());

    let listen_addr = config.listen_addr;
    let log_level = config.log_level;
    let server = tokio::spawn(async move {
        if let Err(e) = http_server::run(listen_addr, log_level, state, shutdown_rx).await {
            tracing::error!("http server failed: {}", e);
        }
    });

    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => tracing::error!("failed to listen for shutdown signal: {}", e),
    }
    let _ = shutdown_tx.send(());

    if timeout(FINAL_SHUTDOWN_TIMEOUT, server).await.is_err() {
        tracing::error!(
            "Failed to shut down within {} seconds",
            FINAL_SHUTDOWN_TIMEOUT.as_secs()
        );
        std::process::exit(4);
    }
}
