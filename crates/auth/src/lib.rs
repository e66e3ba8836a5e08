//! `snippetbox-auth` — authentication primitives.
//!
//! This crate is intentionally decoupled from HTTP and storage: it knows how
//! to hash and check passwords, mint and compare CSRF tokens, and which keys
//! the session bag uses.

pub mod csrf;
pub mod password;
pub mod session;

pub use csrf::{generate_csrf_token, verify_csrf_token};
pub use password::{PasswordError, PasswordHasher, DEFAULT_COST, MIN_COST, PASSWORD_MIN_CHARS};
