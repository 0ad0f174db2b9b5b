use std::{env, path::Path};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, DatabaseConfig};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load `config.toml` (or `CONFIG_PATH`). Without a config file, host, port
/// and database settings come from `SERVER_HOST`, `SERVER_PORT`,
/// `DATABASE_URL` and `RUN_MIGRATIONS`.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        return AppConfig::load_and_validate();
    }
    warn!(%path, "config file not found; using environment");

    let mut cfg = env_fallback(
        env::var("SERVER_HOST").ok(),
        env::var("SERVER_PORT").ok(),
        env::var("RUN_MIGRATIONS").ok(),
        models::db::DATABASE_URL.as_str(),
    );
    cfg.normalize_and_validate()?;
    Ok(cfg)
}

/// Config built from raw env values. Unset or unparsable values keep the
/// `AppConfig::default()` settings.
fn env_fallback(
    host: Option<String>,
    port: Option<String>,
    run_migrations: Option<String>,
    database_url: &str,
) -> AppConfig {
    let mut cfg = AppConfig::default();
    if let Some(host) = host {
        cfg.server.host = host;
    }
    if let Some(port) = port.and_then(|p| p.parse::<u16>().ok()) {
        cfg.server.port = port;
    }
    cfg.database = DatabaseConfig::with_url(database_url);
    cfg.database.run_migrations = run_migrations
        .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
        .unwrap_or(false);
    cfg
}

/// Connect, optionally migrate, and serve until the listener fails.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let app: Router = routes::build_router(ServerState::new(db), build_cors());

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting products server");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Public entry: load env and config, then run the server on a runtime sized
/// by `server.worker_threads`.
pub fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = load_config()?;
    let workers = cfg.server.worker_threads.unwrap_or(4);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(workers)
        .enable_all()
        .build()?;
    runtime.block_on(serve(cfg))
}
