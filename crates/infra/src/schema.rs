//! Idempotent schema bootstrap for the application tables.
//!
//! The session table is owned by the session store and created by it.

use sqlx::PgPool;
use tracing::instrument;

const STATEMENTS: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS snippets (
        id BIGSERIAL PRIMARY KEY,
        title VARCHAR(100) NOT NULL,
        content TEXT NOT NULL,
        created TIMESTAMPTZ NOT NULL,
        expires TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_snippets_created ON snippets (created)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        hashed_password CHAR(60) NOT NULL,
        created TIMESTAMPTZ NOT NULL,
        CONSTRAINT users_uc_email UNIQUE (email)
    )
    "#,
];

#[instrument(skip(pool), err)]
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::Error> {
    for stmt in STATEMENTS {
        sqlx::query(stmt).execute(pool).await?;
    }
    tracing::info!("schema up to date");
    Ok(())
}
