//! Repository error model.
//!
//! ## Error Mapping
//!
//! | Source | Condition | StoreError |
//! |--------|-----------|------------|
//! | row lookup | no row, or snippet expired | `NoRecord` |
//! | credential check | unknown email **or** wrong password | `InvalidCredentials` |
//! | SQLx `Database` | SQLSTATE `23505` on constraint `users_uc_email` | `DuplicateEmail` |
//! | SQLx (anything else) | | `Database` |

use snippetbox_auth::PasswordError;
use thiserror::Error;

/// Name of the unique constraint guarding `users.email`.
pub const USERS_EMAIL_CONSTRAINT: &str = "users_uc_email";

/// PostgreSQL `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no matching record found")]
    NoRecord,

    /// Deliberately does not say which half of the pair was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("blocking task failed: {0}")]
    Task(String),

    #[error("lock poisoned")]
    Poisoned,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// True only for a unique violation on the email constraint.
///
/// Matching on the SQLSTATE alone would misclassify any other unique index
/// added to `users` later.
pub fn is_duplicate_email(code: Option<&str>, constraint: Option<&str>) -> bool {
    code == Some(UNIQUE_VIOLATION) && constraint == Some(USERS_EMAIL_CONSTRAINT)
}

/// Translate an insert failure on `users`.
pub(crate) fn map_user_insert_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if is_duplicate_email(db_err.code().as_deref(), db_err.constraint()) {
            return StoreError::DuplicateEmail;
        }
    }
    StoreError::Database(err)
}
