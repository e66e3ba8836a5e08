//! Password hashing (bcrypt).

use thiserror::Error;

/// Production work factor.
pub const DEFAULT_COST: u32 = 12;

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Minimum accepted password length at signup, in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Hashes and verifies passwords with a fixed bcrypt cost.
///
/// Production uses [`DEFAULT_COST`]; tests drop to [`MIN_COST`].
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is malformed.
    pub fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, PasswordError> {
        match bcrypt::verify(plaintext, hashed) {
            Ok(ok) => Ok(ok),
            Err(e) => {
                tracing::warn!(error = %e, "stored password hash could not be parsed");
                Err(e.into())
            }
        }
    }

    /// Spend the same bcrypt work as [`verify`](Self::verify) when there is no
    /// stored hash to check against. Always `Ok(false)`.
    ///
    /// Keeps "no such account" as slow as "wrong password".
    pub fn verify_absent(&self, plaintext: &str) -> Result<bool, PasswordError> {
        bcrypt::hash(plaintext, self.cost)?;
        Ok(false)
    }
}
