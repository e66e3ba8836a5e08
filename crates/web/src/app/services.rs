//! Service wiring: repositories, templates, runtime settings.
//!
//! Handlers receive one shared `Arc<AppServices>` through an `Extension`.
//! Storage is behind traits so the same router runs against Postgres in
//! production and against in-memory repositories in tests.

use std::sync::Arc;

use sqlx::PgPool;

use snippetbox_auth::PasswordHasher;
use snippetbox_infra::{
    InMemorySnippetRepository, InMemoryUserRepository, PostgresSnippetRepository,
    PostgresUserRepository, SnippetRepository, UserRepository,
};

use crate::app::templates::Templates;
use crate::config::Settings;

pub struct AppServices {
    pub snippets: Arc<dyn SnippetRepository>,
    pub users: Arc<dyn UserRepository>,
    pub templates: Templates,
    pub settings: Settings,
}

impl AppServices {
    pub fn new(
        snippets: Arc<dyn SnippetRepository>,
        users: Arc<dyn UserRepository>,
        settings: Settings,
    ) -> Result<Self, tera::Error> {
        Ok(Self {
            snippets,
            users,
            templates: Templates::new()?,
            settings,
        })
    }

    /// Postgres-backed services sharing one pool.
    pub fn postgres(
        pool: PgPool,
        hasher: PasswordHasher,
        settings: Settings,
    ) -> Result<Self, tera::Error> {
        Self::new(
            Arc::new(PostgresSnippetRepository::new(pool.clone())),
            Arc::new(PostgresUserRepository::new(pool, hasher)),
            settings,
        )
    }

    /// Process-local services (tests, demos).
    pub fn in_memory(hasher: PasswordHasher, settings: Settings) -> Result<Self, tera::Error> {
        Self::new(
            Arc::new(InMemorySnippetRepository::new()),
            Arc::new(InMemoryUserRepository::new(hasher)),
            settings,
        )
    }
}
