use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::sync::OnceLock;

use crate::config::Config;
use crate::migrations::run_migrations;

pub type DbPool = Pool<SqliteConnectionManager>;

static SHARED_POOL: OnceLock<DbPool> = OnceLock::new();

fn with_foreign_keys(manager: SqliteConnectionManager) -> SqliteConnectionManager {
    manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"))
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool, r2d2::Error> {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    // Remove query parameters (e.g., ?mode=rwc)
    let path = path.split('?').next().unwrap_or(path);

    if path == ":memory:" {
        return create_memory_pool();
    }

    Pool::builder()
        .max_size(max_size)
        .build(with_foreign_keys(SqliteConnectionManager::file(Path::new(path))))
}

/// In-memory databases live and die with their connection, so the pool holds exactly one.
pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    Pool::builder()
        .max_size(1)
        .build(with_foreign_keys(SqliteConnectionManager::memory()))
}

/// Process-wide pool. The first call opens the database and runs migrations;
/// later calls return the same pool without reopening.
pub fn shared_pool(config: &Config) -> anyhow::Result<DbPool> {
    if let Some(pool) = SHARED_POOL.get() {
        return Ok(pool.clone());
    }

    tracing::info!("Opening database: {}", config.database_url);
    let pool = create_pool(&config.database_url, config.pool_size)?;
    run_migrations(&pool)?;

    // A concurrent initializer may have won the race; keep whichever landed first.
    Ok(SHARED_POOL.get_or_init(|| pool).clone())
}
