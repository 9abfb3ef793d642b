//! gregging-server - Gregging Algorithms HTTP backend
//!
//! Startup order: parse arguments, load configuration, initialize logging,
//! open the database, then serve until Ctrl+C or SIGTERM.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gregging_common::config::{resolve_config_path, ConfigSource, TomlConfig};
use gregging_common::db::{init_database, seed, sessions};
use gregging_server::{build_router, AppState};
use sqlx::SqlitePool;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How often expired sessions are deleted
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Command-line arguments for gregging-server
#[derive(Parser, Debug)]
#[command(name = "gregging-server")]
#[command(about = "HTTP backend for the Gregging Algorithms learning site")]
#[command(version)]
struct Args {
    /// TOML config file (default: GREGGING_CONFIG, then the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "GREGGING_PORT")]
    port: Option<u16>,

    /// SQLite database file
    #[arg(short, long, env = "GREGGING_DATABASE")]
    database: Option<PathBuf>,

    /// Directory with a built frontend to serve
    #[arg(long, env = "GREGGING_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Insert demo users, quizzes and a discussion into an empty database
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let (mut config, source) = TomlConfig::load_or_default(config_path.as_deref())
        .context("Failed to load configuration")?;
    config.apply_env_overrides();

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Gregging server (gregging-server) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &source {
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::Defaults { missing: Some(path) } => {
            warn!("Config file {} not found, using defaults", path.display())
        }
        ConfigSource::Defaults { missing: None } => {
            warn!("No config directory available, using defaults")
        }
    }

    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(database) = args.database {
        config.database_path = Some(database);
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = Some(static_dir);
    }
    config.validate().context("Invalid configuration")?;

    let db_path = config.resolved_database_path();
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path, config.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;

    match sessions::purge_expired_sessions(&pool).await {
        Ok(0) => {}
        Ok(n) => info!("Purged {} expired sessions", n),
        Err(e) => warn!("Failed to purge expired sessions: {}", e),
    }

    if args.seed {
        seed::seed_demo_data(&pool)
            .await
            .context("Failed to seed demo data")?;
    }

    tokio::spawn(purge_sessions_periodically(pool.clone()));

    let addr = format!("{}:{}", config.bind_address, config.port);
    let state = AppState::new(pool, config).context("Failed to initialize chat client")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("gregging-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Delete expired sessions every [`SESSION_PURGE_INTERVAL`]
async fn purge_sessions_periodically(pool: SqlitePool) {
    let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
    // First tick fires immediately; startup already purged
    interval.tick().await;

    loop {
        interval.tick().await;
        match sessions::purge_expired_sessions(&pool).await {
            Ok(0) => {}
            Ok(n) => info!("Purged {} expired sessions", n),
            Err(e) => error!("Session purge failed: {}", e),
        }
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
