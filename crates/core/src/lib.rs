//! `snippetbox-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** types and rules (no HTTP, no storage).

pub mod entity;
pub mod error;
pub mod id;
pub mod snippet;
pub mod time;
pub mod user;
pub mod validator;

pub use entity::Entity;
pub use error::DomainError;
pub use id::{SnippetId, UserId};
pub use snippet::{Snippet, PERMITTED_EXPIRY_DAYS, SNIPPET_TITLE_MAX_CHARS};
pub use time::human_date;
pub use user::{User, USER_EMAIL_MAX_CHARS, USER_NAME_MAX_CHARS};
pub use validator::Validator;
