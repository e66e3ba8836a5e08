//! Snippet repository boundary.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemorySnippetRepository;
pub use postgres::PostgresSnippetRepository;

use snippetbox_core::{Snippet, SnippetId};

use crate::StoreError;

/// Persistence for snippets.
///
/// Expired snippets are never returned by any read; they are filtered out,
/// not deleted.
#[async_trait::async_trait]
pub trait SnippetRepository: Send + Sync {
    /// Store a new snippet expiring `expires_days` from now; returns its id.
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<SnippetId, StoreError>;

    /// Fetch a non-expired snippet, or `StoreError::NoRecord`.
    async fn get(&self, id: SnippetId) -> Result<Snippet, StoreError>;

    /// Up to `limit` non-expired snippets, newest first.
    async fn latest(&self, limit: u32) -> Result<Vec<Snippet>, StoreError>;
}
