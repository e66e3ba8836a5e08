//! Login state kept in the session.
//!
//! A login has an absolute deadline stored next to the user id. The session
//! record and cookie expire at that deadline as well, but the stored value is
//! what `authenticate` trusts.

use time::OffsetDateTime;
use tower_sessions::{Expiry, Session};

use snippetbox_auth::session as keys;
use snippetbox_core::UserId;

use crate::app::errors::AppError;

/// Attach `user_id` to the session until `now + lifetime`.
///
/// The session id is replaced first; the old one may have been planted.
pub async fn begin(
    session: &Session,
    user_id: UserId,
    lifetime: time::Duration,
) -> Result<OffsetDateTime, AppError> {
    let deadline = OffsetDateTime::now_utc() + lifetime;

    session.cycle_id().await?;
    session
        .insert(keys::AUTHENTICATED_USER_ID, user_id.get())
        .await?;
    session
        .insert(keys::AUTHENTICATED_UNTIL, to_unix_millis(deadline))
        .await?;
    session.set_expiry(Some(Expiry::AtDateTime(deadline)));

    Ok(deadline)
}

/// Remove the login from the session, keeping the rest of it (CSRF token,
/// flash) under a fresh id.
pub async fn end(session: &Session) -> Result<(), AppError> {
    session.cycle_id().await?;
    session.remove::<i64>(keys::AUTHENTICATED_USER_ID).await?;
    session.remove::<i64>(keys::AUTHENTICATED_UNTIL).await?;
    session.set_expiry(None);
    Ok(())
}

/// The logged-in user and the login deadline, if the login is still live.
///
/// A login that is past its deadline, or has no deadline, is ended here.
pub async fn current(session: &Session) -> Result<Option<(UserId, OffsetDateTime)>, AppError> {
    let Some(id) = session.get::<i64>(keys::AUTHENTICATED_USER_ID).await? else {
        return Ok(None);
    };

    let deadline = session
        .get::<i64>(keys::AUTHENTICATED_UNTIL)
        .await?
        .and_then(from_unix_millis);

    match deadline {
        Some(deadline) if deadline > OffsetDateTime::now_utc() => {
            Ok(Some((UserId::new(id), deadline)))
        }
        _ => {
            tracing::debug!(user_id = id, "login expired");
            end(session).await?;
            Ok(None)
        }
    }
}

fn to_unix_millis(t: OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

fn from_unix_millis(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(ms) * 1_000_000).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[test]
    fn millis_keep_sub_second_precision() {
        let t = OffsetDateTime::from_unix_timestamp_nanos(1_700_000_000_123_000_000).unwrap();
        assert_eq!(from_unix_millis(to_unix_millis(t)), Some(t));
    }

    #[tokio::test]
    async fn live_login_is_reported() {
        let session = session();
        let deadline = begin(&session, UserId::new(7), time::Duration::hours(12))
            .await
            .unwrap();

        let (user_id, until) = current(&session).await.unwrap().unwrap();
        assert_eq!(user_id, UserId::new(7));
        assert_eq!(to_unix_millis(until), to_unix_millis(deadline));
    }

    #[tokio::test]
    async fn expired_login_is_ended() {
        let session = session();
        session.insert(keys::CSRF_TOKEN, "tok").await.unwrap();
        begin(&session, UserId::new(7), time::Duration::seconds(-1))
            .await
            .unwrap();

        assert!(current(&session).await.unwrap().is_none());
        assert_eq!(
            session.get::<i64>(keys::AUTHENTICATED_USER_ID).await.unwrap(),
            None
        );
        assert_eq!(
            session.get::<String>(keys::CSRF_TOKEN).await.unwrap().as_deref(),
            Some("tok")
        );
    }

    #[tokio::test]
    async fn login_without_deadline_is_ended() {
        let session = session();
        session
            .insert(keys::AUTHENTICATED_USER_ID, 7_i64)
            .await
            .unwrap();

        assert!(current(&session).await.unwrap().is_none());
        assert_eq!(
            session.get::<i64>(keys::AUTHENTICATED_USER_ID).await.unwrap(),
            None
        );
    }
}
