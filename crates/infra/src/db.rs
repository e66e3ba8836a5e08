//! Connection pool construction.

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::instrument;

/// Open a pool and make sure the server answers before returning.
#[instrument(skip(dsn), err)]
pub async fn connect(dsn: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(dsn)
        .await?;

    sqlx::query("SELECT 1").execute(&pool).await?;
    tracing::info!(max_connections, "database pool ready");

    Ok(pool)
}
