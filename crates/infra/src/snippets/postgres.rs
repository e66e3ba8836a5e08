//! Postgres-backed snippet repository.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use snippetbox_core::{Snippet, SnippetId};

use super::SnippetRepository;
use crate::StoreError;

/// Snippet repository over a shared connection pool.
///
/// Expiry is computed and compared by the database clock (`NOW()`), so every
/// instance of the app agrees on what has expired.
#[derive(Debug, Clone)]
pub struct PostgresSnippetRepository {
    pool: PgPool,
}

impl PostgresSnippetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn snippet_from_row(row: &PgRow) -> Result<Snippet, sqlx::Error> {
    Ok(Snippet {
        id: SnippetId::new(row.try_get::<i64, _>("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created: row.try_get::<DateTime<Utc>, _>("created")?,
        expires: row.try_get::<DateTime<Utc>, _>("expires")?,
    })
}

#[async_trait::async_trait]
impl SnippetRepository for PostgresSnippetRepository {
    #[instrument(skip(self, content), err(level = "debug"))]
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<SnippetId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, NOW(), NOW() + make_interval(days => $3))
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(expires_days)
        .fetch_one(&self.pool)
        .await?;

        Ok(SnippetId::new(row.try_get("id")?))
    }

    #[instrument(skip(self), fields(snippet_id = %id), err(level = "debug"))]
    async fn get(&self, id: SnippetId) -> Result<Snippet, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW() AND id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(snippet_from_row(&row)?),
            None => Err(StoreError::NoRecord),
        }
    }

    #[instrument(skip(self), err(level = "debug"))]
    async fn latest(&self, limit: u32) -> Result<Vec<Snippet>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > NOW()
            ORDER BY id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        let mut snippets = Vec::with_capacity(rows.len());
        for row in &rows {
            snippets.push(snippet_from_row(row)?);
        }
        Ok(snippets)
    }
}
