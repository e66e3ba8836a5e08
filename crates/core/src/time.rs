//! Presentation helpers for timestamps.

use chrono::{DateTime, Utc};

/// Format a timestamp as `02 Jan 2006 at 15:04` (UTC).
pub fn human_date(t: DateTime<Utc>) -> String {
    t.format("%d %b %Y at %H:%M").to_string()
}
