pub mod kv_repo;
pub use kv_repo::KeyValueRepository;
pub mod seed;
pub mod storage;
pub use storage::PersistentStore;

use std::time::Duration;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::common::error::AppError;

// Conecta ao arquivo SQLite local (ex: "sqlite://estoque.db?mode=rwc")
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect(database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Banco em memória já migrado. Uma única conexão que nunca expira,
/// senão cada conexão nova enxergaria um banco vazio.
pub async fn memory_pool() -> Result<SqlitePool, AppError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await?;
    run_migrations(&pool).await?;
    Ok(pool)
}
