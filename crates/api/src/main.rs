use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use proxyhub_api::config::{AppConfig, LogConfig, LogFormat, DEFAULT_LOG_FILTER};
use proxyhub_api::server::Server;
use proxyhub_db::repositories::PgProxyClientRepo;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = AppConfig::from_env().context("invalid configuration")?;

    // --- Tracing ---
    init_tracing(&config.log);
    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        "Loaded server configuration"
    );

    // --- Database ---
    let pool = proxyhub_db::create_pool(&config.database.url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Database connection pool created");

    proxyhub_db::health_check(&pool)
        .await
        .context("database health check failed")?;
    tracing::info!("Database health check passed");

    // --- Server ---
    let repo = Arc::new(PgProxyClientRepo::new(pool.clone()));
    let server = Arc::new(Server::new(config, repo));
    let mut serve_task = tokio::spawn({
        let server = Arc::clone(&server);
        async move { server.start().await }
    });

    tokio::select! {
        () = shutdown_signal() => server.stop(),
        joined = &mut serve_task => {
            pool.close().await;
            return joined.context("server task panicked")?.map_err(Into::into);
        }
    }

    serve_task
        .await
        .context("server task panicked")?
        .context("server failed")?;

    pool.close().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_new(&log.filter).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{}' ({e}), using default", log.filter);
        EnvFilter::new(DEFAULT_LOG_FILTER)
    });
    let registry = tracing_subscriber::registry().with(filter);

    match log.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT (Ctrl-C), shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
