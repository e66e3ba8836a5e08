//! Form validation: composable predicates plus an error accumulator.
//!
//! A [`Validator`] is embedded into each form struct. Every check is run
//! unconditionally; for a given field the **first** recorded message wins.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Email address pattern (the WHATWG `input[type=email]` grammar).
pub static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Accumulated validation errors for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Validator {
    /// Field name -> message. Keys are unique; insertion order is irrelevant.
    pub field_errors: HashMap<String, String>,
    /// Failures not attributable to a single field (e.g. a bad credential pair).
    pub non_field_errors: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff no field error and no non-field error has been recorded.
    pub fn valid(&self) -> bool {
        self.field_errors.is_empty() && self.non_field_errors.is_empty()
    }

    /// Record `message` for `key` unless the field already has an error.
    pub fn add_field_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.field_errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    pub fn add_non_field_error(&mut self, message: impl Into<String>) {
        self.non_field_errors.push(message.into());
    }

    /// Record `message` for `key` only if `ok` is false.
    pub fn check_field(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_field_error(key, message);
        }
    }

    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.field_errors.get(key).map(String::as_str)
    }
}

/// True if `value` contains at least one non-whitespace character.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// True if `value` has at most `n` characters (Unicode scalar values, not bytes).
pub fn max_chars(value: &str, n: usize) -> bool {
    value.chars().count() <= n
}

/// True if `value` has at least `n` characters.
pub fn min_chars(value: &str, n: usize) -> bool {
    value.chars().count() >= n
}

pub fn matches(value: &str, rx: &Regex) -> bool {
    rx.is_match(value)
}

/// True if `value` is one of `permitted`.
pub fn permitted_value<T: PartialEq>(value: T, permitted: &[T]) -> bool {
    permitted.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_validator_is_valid() {
        assert!(Validator::new().valid());
    }

    #[test]
    fn first_error_for_a_field_wins() {
        let mut v = Validator::new();
        v.check_field(false, "title", "This field cannot be blank");
        v.check_field(false, "title", "This field cannot be more than 100 characters long");
        assert_eq!(v.field_error("title"), Some("This field cannot be blank"));
        assert_eq!(v.field_errors.len(), 1);
    }

    #[test]
    fn passing_check_records_nothing() {
        let mut v = Validator::new();
        v.check_field(true, "title", "unused");
        assert!(v.valid());
        assert_eq!(v.field_error("title"), None);
    }

    #[test]
    fn non_field_error_invalidates() {
        let mut v = Validator::new();
        v.add_non_field_error("Email or password is incorrect");
        assert!(!v.valid());
        assert!(v.field_errors.is_empty());
    }

    #[test]
    fn blank_detection_trims_whitespace() {
        assert!(!not_blank(""));
        assert!(!not_blank(" \t\n"));
        assert!(not_blank(" x "));
    }

    #[test]
    fn length_checks_count_characters_not_bytes() {
        let s = "é".repeat(100);
        assert_eq!(s.len(), 200);
        assert!(max_chars(&s, 100));
        assert!(!max_chars(&s, 99));
        assert!(min_chars(&s, 100));
        assert!(!min_chars("short", 8));
    }

    #[test]
    fn permitted_value_membership() {
        assert!(permitted_value(7, &[1, 7, 365]));
        assert!(!permitted_value(30, &[1, 7, 365]));
        assert!(!permitted_value(0, &[]));
    }

    #[test]
    fn email_pattern() {
        assert!(matches("alice@example.com", &EMAIL_RX));
        assert!(matches("bob.smith+tag@sub.example.co", &EMAIL_RX));
        assert!(!matches("alice@", &EMAIL_RX));
        assert!(!matches("not an email", &EMAIL_RX));
        assert!(!matches("@example.com", &EMAIL_RX));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: valid() is true iff every check passed.
            #[test]
            fn valid_iff_all_checks_pass(
                checks in proptest::collection::vec((any::<bool>(), "[a-d]"), 0..20)
            ) {
                let mut v = Validator::new();
                for (ok, key) in &checks {
                    v.check_field(*ok, key, "failed");
                }
                let all_ok = checks.iter().all(|(ok, _)| *ok);
                prop_assert_eq!(v.valid(), all_ok);
            }

            /// Property: the first failing message per field is the one kept.
            #[test]
            fn first_failure_is_never_overwritten(
                checks in proptest::collection::vec((any::<bool>(), "[a-c]", "[a-z]{1,8}"), 0..30)
            ) {
                let mut v = Validator::new();
                let mut expected: HashMap<String, String> = HashMap::new();
                for (ok, key, msg) in &checks {
                    v.check_field(*ok, key, msg);
                    if !*ok {
                        expected.entry(key.clone()).or_insert_with(|| msg.clone());
                    }
                }
                prop_assert_eq!(&v.field_errors, &expected);
            }
        }
    }
}
