//! Snippet entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Entity, SnippetId};

/// Maximum length of a snippet title, in characters.
pub const SNIPPET_TITLE_MAX_CHARS: usize = 100;

/// Lifetimes (in days) a snippet may be created with.
pub const PERMITTED_EXPIRY_DAYS: [i32; 3] = [1, 7, 365];

/// A stored text entry.
///
/// # Invariants
/// - Never updated after creation.
/// - Only retrievable while `now < expires`; expired rows stay in storage but
///   become unreachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Snippet {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

impl Entity for Snippet {
    type Id = SnippetId;

    fn id(&self) -> SnippetId {
        self.id
    }
}
