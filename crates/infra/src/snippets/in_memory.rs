use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use snippetbox_core::{Entity, Snippet, SnippetId};

use super::SnippetRepository;
use crate::StoreError;

/// In-memory snippet repository.
///
/// Intended for tests/dev. Same visibility rules as the Postgres version,
/// evaluated against the process clock.
#[derive(Debug, Default)]
pub struct InMemorySnippetRepository {
    rows: RwLock<Vec<Snippet>>,
}

impl InMemorySnippetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with explicit timestamps (e.g. to seed already-expired rows).
    pub fn insert_with_times(
        &self,
        title: &str,
        content: &str,
        created: DateTime<Utc>,
        expires: DateTime<Utc>,
    ) -> Result<SnippetId, StoreError> {
        let mut rows = self.rows.write().map_err(|_| StoreError::Poisoned)?;
        let id = SnippetId::new(rows.len() as i64 + 1);
        rows.push(Snippet {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created,
            expires,
        });
        Ok(id)
    }
}

#[async_trait::async_trait]
impl SnippetRepository for InMemorySnippetRepository {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> Result<SnippetId, StoreError> {
        let now = Utc::now();
        self.insert_with_times(title, content, now, now + Duration::days(i64::from(expires_days)))
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        let now = Utc::now();
        rows.iter()
            .find(|s| s.id() == id && !s.is_expired_at(now))
            .cloned()
            .ok_or(StoreError::NoRecord)
    }

    async fn latest(&self, limit: u32) -> Result<Vec<Snippet>, StoreError> {
        let rows = self.rows.read().map_err(|_| StoreError::Poisoned)?;
        let now = Utc::now();
        Ok(rows
            .iter()
            .rev()
            .filter(|s| !s.is_expired_at(now))
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
