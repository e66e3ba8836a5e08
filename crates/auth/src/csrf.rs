//! CSRF synchronizer tokens.
//!
//! A token is minted once per session and must be echoed back on every
//! state-changing request.

use uuid::Uuid;

/// Mint a new random token (two v4 UUIDs, 244 random bits, hex encoded).
pub fn generate_csrf_token() -> String {
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Compare a submitted token against the session token in constant time.
pub fn verify_csrf_token(expected: &str, submitted: &str) -> bool {
    let a = expected.as_bytes();
    let b = submitted.as_bytes();
    if a.is_empty() || a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
