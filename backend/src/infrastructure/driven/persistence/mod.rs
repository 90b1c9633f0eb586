pub mod user_repository;
pub mod in_memory_user_repository;

pub use user_repository::PostgresUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;

use anyhow::{Context, Result};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::infrastructure::config::DatabaseSettings;

/// Opens the pool and brings the schema up to date.
pub async fn connect(url: &str, settings: &DatabaseSettings) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(url)
        .await
        .context("Failed to connect to Postgres")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(pool)
}
