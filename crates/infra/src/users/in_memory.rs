use std::sync::RwLock;

use chrono::Utc;

use snippetbox_auth::PasswordHasher;
use snippetbox_core::{Entity, User, UserId};

use super::{UserRepository, blocking};
use crate::StoreError;

/// In-memory user repository.
///
/// Intended for tests/dev. Enforces email uniqueness like the
/// `users_uc_email` constraint does.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
    hasher: PasswordHasher,
}

impl InMemoryUserRepository {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            users: RwLock::new(Vec::new()),
            hasher,
        }
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, name: &str, email: &str, password: &str) -> Result<(), StoreError> {
        let hasher = self.hasher;
        let plaintext = password.to_owned();
        let hashed_password = blocking(move || hasher.hash(&plaintext)).await??;

        let mut users = self.users.write().map_err(|_| StoreError::Poisoned)?;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }
        let id = UserId::new(users.len() as i64 + 1);
        users.push(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            hashed_password,
            created: Utc::now(),
        });
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserId, StoreError> {
        let hasher = self.hasher;
        let plaintext = password.to_owned();

        let Some(user) = self.find_by_email(email)? else {
            blocking(move || hasher.verify_absent(&plaintext)).await??;
            return Err(StoreError::InvalidCredentials);
        };

        let hashed = user.hashed_password.clone();
        let ok = blocking(move || hasher.verify(&plaintext, &hashed)).await??;

        if ok {
            Ok(user.id())
        } else {
            Err(StoreError::InvalidCredentials)
        }
    }

    async fn exists(&self, id: UserId) -> Result<bool, StoreError> {
        let users = self.users.read().map_err(|_| StoreError::Poisoned)?;
        Ok(users.iter().any(|u| u.id() == id))
    }
}
