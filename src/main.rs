//! switchifier server entry point.
//!
//! Resolves configuration, bootstraps the database schema, and serves the
//! HTTP API until interrupted.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use switchifier::api;
use switchifier::app_state::AppState;
use switchifier::config::{Cli, SwitchifierConfig};
use switchifier::persistence::SqliteEventLog;
use switchifier::service::StateRecorder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.log_json);

    let config = SwitchifierConfig::from_cli(cli).context("invalid configuration")?;
    tracing::info!(
        db_path = %config.db_path.display(),
        addr = %config.listen_addr,
        "starting switchifier"
    );
    if config.uses_default_secret() {
        tracing::warn!("using the default update secret; set --secret or --secret-path");
    }

    let log = SqliteEventLog::connect(&config.db_path, config.db_connect_timeout)
        .await
        .with_context(|| format!("cannot open database {}", config.db_path.display()))?;
    log.run_schema_update()
        .await
        .context("could not run schema update")?;
    tracing::info!("schema updates applied");

    let recorder = Arc::new(StateRecorder::new(log.clone()));
    let app = api::build_app(AppState::new(recorder, config.secret.clone()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("cannot bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log.close().await;
    tracing::info!("switchifier stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
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
    tracing::info!("shutdown signal received");
}
