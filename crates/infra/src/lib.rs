//! Infrastructure layer: Postgres pool, schema bootstrap, repositories.

pub mod db;
pub mod error;
pub mod schema;
pub mod snippets;
pub mod users;

pub use error::StoreError;
pub use snippets::{InMemorySnippetRepository, PostgresSnippetRepository, SnippetRepository};
pub use users::{InMemoryUserRepository, PostgresUserRepository, UserRepository};
