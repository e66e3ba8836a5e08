//! Postgres-backed user repository.

use sqlx::{PgPool, Row};
use tracing::instrument;

use snippetbox_auth::PasswordHasher;
use snippetbox_core::UserId;

use super::{UserRepository, blocking};
use crate::StoreError;
use crate::error::map_user_insert_error;

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
    hasher: PasswordHasher,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool, hasher: PasswordHasher) -> Self {
        Self { pool, hasher }
    }
}

#[async_trait::async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, email, password), err(level = "debug"))]
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), StoreError> {
        let hasher = self.hasher;
        let plaintext = password.to_owned();
        let hashed = blocking(move || hasher.hash(&plaintext)).await??;

        sqlx::query(
            r#"
            INSERT INTO users (name, email, hashed_password, created)
            VALUES ($1, $2, $3, NOW())
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(hashed)
        .execute(&self.pool)
        .await
        .map_err(map_user_insert_error)?;

        Ok(())
    }

    #[instrument(skip(self, email, password), err(level = "debug"))]
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, StoreError> {
        let row = sqlx::query("SELECT id, hashed_password FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        let hasher = self.hasher;
        let plaintext = password.to_owned();

        let Some(row) = row else {
            blocking(move || hasher.verify_absent(&plaintext)).await??;
            return Err(StoreError::InvalidCredentials);
        };
        let id = UserId::new(row.try_get::<i64, _>("id")?);
        let hashed: String = row.try_get("hashed_password")?;

        let ok = blocking(move || hasher.verify(&plaintext, &hashed)).await??;

        if ok {
            Ok(id)
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    #[instrument(skip(self), fields(user_id = %id), err(level = "debug"))]
    async fn exists(&self, id: UserId) -> Result<bool, StoreError> {
        let row = sqlx::query("SELECT EXISTS(SELECT true FROM users WHERE id = $1)")
            .bind(id.get())
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get::<bool, _>(0)?)
    }
}
