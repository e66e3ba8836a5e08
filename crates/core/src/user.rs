//! User entity.

use chrono::{DateTime, Utc};

use crate::{Entity, UserId};

/// Column widths of `users.name` and `users.email`, in characters.
pub const USER_NAME_MAX_CHARS: usize = 255;
pub const USER_EMAIL_MAX_CHARS: usize = 255;

/// A registered account.
///
/// `email` is unique across all users; uniqueness is enforced by the store.
/// The hash is never serialized, so the type deliberately has no serde derives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub created: DateTime<Utc>,
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}
