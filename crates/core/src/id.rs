//! Strongly-typed identifiers used across the domain.
//!
//! Both entities use database-generated integer keys, so the newtypes wrap
//! `i64` and only accept strictly positive values when parsed.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a stored snippet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(i64);

/// Identifier of a registered user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .parse::<i64>()
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                if value < 1 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be positive, got {}",
                        $name, value
                    )));
                }
                Ok(Self(value))
            }
        }
    };
}

impl_int_newtype!(SnippetId, "SnippetId");
impl_int_newtype!(UserId, "UserId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!("42".parse::<SnippetId>().unwrap(), SnippetId::new(42));
        assert_eq!("1".parse::<UserId>().unwrap().get(), 1);
    }

    #[test]
    fn rejects_zero_negative_and_garbage() {
        for raw in ["0", "-3", "abc", "", "1.5"] {
            match raw.parse::<SnippetId>() {
                Err(DomainError::InvalidId(_)) => {}
                other => panic!("expected InvalidId for {raw:?}, got {other:?}"),
            }
        }
    }
}
