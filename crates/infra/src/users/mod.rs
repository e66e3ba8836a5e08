//! User repository boundary.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;

use snippetbox_core::UserId;

use crate::StoreError;

/// Persistence for user accounts.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Hash `password` and store a new account.
    ///
    /// Fails with `StoreError::DuplicateEmail` when `email` is already taken.
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), StoreError>;

    /// Check a credential pair and return the account id.
    ///
    /// An unknown email and a wrong password both yield
    /// `StoreError::InvalidCredentials`, so callers cannot enumerate accounts.
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, StoreError>;

    async fn exists(&self, id: UserId) -> Result<bool, StoreError>;
}

/// Run CPU-bound password work off the async worker threads.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Task(e.to_string()))
}
