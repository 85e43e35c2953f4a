//! notekeep server entry point.
//!
//! # Responsibility
//! - Load configuration, initialize logging and open the database once.
//! - Serve the REST API until Ctrl-C / SIGTERM, draining in-flight requests.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use log::{info, warn};
use notekeep_api::{build_router, ServerState};
use notekeep_core::{default_log_level, init_logging, open_db, TokenIssuer};
use std::sync::Arc;

const MIN_RECOMMENDED_SECRET_LEN: usize = 32;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional; existing environment variables take precedence.
    let _ = dotenvy::dotenv();
    let config = Config::parse();

    let level = config
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_logging(&level, config.log_dir.as_deref()).map_err(anyhow::Error::msg)?;

    if config.jwt_secret.len() < MIN_RECOMMENDED_SECRET_LEN {
        warn!(
            "event=config_check module=cli status=weak_secret min_len={}",
            MIN_RECOMMENDED_SECRET_LEN
        );
    }
    let tokens = TokenIssuer::new(&config.jwt_secret).context("invalid JWT_SECRET")?;

    let db = Arc::new(
        open_db(&config.db_path)
            .with_context(|| format!("failed to open {}", config.db_path.display()))?,
    );
    let state = ServerState::new(db, tokens)
        .with_environment(config.environment.clone())
        .into_shared();
    let app = build_router(state, &config.cors());

    let (host, port) = config.bind_target();
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("failed to bind {host}:{port}"))?;
    let addr = listener.local_addr().context("listener has no local address")?;
    info!(
        "event=server_start module=cli status=ok addr={} environment={}",
        addr, config.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The router (and with it the last database handle) is dropped by now.
    info!("event=server_stop module=cli status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("event=signal_install module=cli status=error signal=ctrl_c error={err}");
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
                warn!("event=signal_install module=cli status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("event=server_shutdown module=cli status=start");
}
