//! Keys of the server-side session bag.

/// Id of the logged-in user (`i64`).
pub const AUTHENTICATED_USER_ID: &str = "authenticated_user_id";

/// One-shot notification shown on the next rendered page.
pub const FLASH: &str = "flash";

/// Per-session CSRF synchronizer token.
pub const CSRF_TOKEN: &str = "csrf_token";

/// Path a user was bounced from by the login gate; consumed after login.
pub const REDIRECT_AFTER_LOGIN: &str = "redirect_after_login";

/// Absolute end of the current login, in unix milliseconds.
pub const AUTHENTICATED_UNTIL: &str = "authenticated_until";
