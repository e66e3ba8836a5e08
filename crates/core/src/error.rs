//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deterministic input failures only. Storage concerns
/// (missing rows, constraint violations) belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure, non-positive).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
