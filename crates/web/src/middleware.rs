use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{Body, to_bytes},
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::{Expiry, Session};

use snippetbox_auth::{session as keys, verify_csrf_token};

use crate::app::errors::{AppError, status_response};
use crate::app::services::AppServices;
use crate::context::{AuthContext, CsrfToken};
use crate::login;

/// Largest form body the CSRF check will buffer.
pub const MAX_FORM_BYTES: usize = 64 * 1024;

/// Header alternative to the `csrf_token` form field.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// One structured line per request.
pub async fn log_request(req: Request, next: Next) -> Response {
    let remote_addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let started = Instant::now();

    let res = next.run(req).await;

    tracing::info!(
        remote_addr = %remote_addr,
        proto = ?version,
        method = %method,
        uri = %uri,
        status = res.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    res
}

pub async fn secure_headers(req: Request, next: Next) -> Response {
    let mut res = next.run(req).await;
    let headers = res.headers_mut();
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(
            "default-src 'self'; style-src 'self' fonts.googleapis.com; font-src fonts.gstatic.com",
        ),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("origin-when-cross-origin"),
    );
    headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("deny"));
    headers.insert(header::X_XSS_PROTECTION, HeaderValue::from_static("0"));
    res
}

/// Response for `CatchPanicLayer`: bare 500, and the connection is not reused.
///
/// The panic itself (with its backtrace) is logged by the process panic hook.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "recovered from handler panic");

    let mut res = status_response(StatusCode::INTERNAL_SERVER_ERROR);
    res.headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    res
}

/// Synchronizer-token CSRF protection.
///
/// The session's token (minted when a form page is rendered) is exposed to
/// handlers as a [`CsrfToken`] extension. Unsafe methods must echo it back,
/// either in the `X-CSRF-Token` header or in the `csrf_token` form field; a
/// session without a token can never pass.
pub async fn csrf_protect(session: Session, req: Request, next: Next) -> Result<Response, AppError> {
    let token = session
        .get::<String>(keys::CSRF_TOKEN)
        .await?
        .unwrap_or_default();

    let mut req = if req.method().is_safe() {
        req
    } else {
        check_csrf(&token, req).await?
    };

    req.extensions_mut().insert(CsrfToken(token));
    Ok(next.run(req).await)
}

/// Verify the submitted token and hand back an equivalent request.
async fn check_csrf(expected: &str, req: Request) -> Result<Request, AppError> {
    if let Some(submitted) = header_token(req.headers()) {
        return if verify_csrf_token(expected, submitted) {
            Ok(req)
        } else {
            Err(AppError::bad_request("csrf token mismatch"))
        };
    }

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BYTES)
        .await
        .map_err(|e| AppError::bad_request(format!("reading form body: {e}")))?;

    let fields: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
        .map_err(|e| AppError::bad_request(format!("form: {e}")))?;
    let submitted = fields
        .iter()
        .find(|(k, _)| k == keys::CSRF_TOKEN)
        .map(|(_, v)| v.as_str())
        .unwrap_or_default();

    if !verify_csrf_token(expected, submitted) {
        return Err(AppError::bad_request("csrf token missing or mismatched"));
    }
    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok())
}

/// Resolve the session's login into an [`AuthContext`].
///
/// A login past its deadline is ended. A session naming a user that no
/// longer exists counts as anonymous.
pub async fn authenticate(
    State(services): State<Arc<AppServices>>,
    session: Session,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth = match login::current(&session).await? {
        Some((user_id, deadline)) => {
            if services.users.exists(user_id).await? {
                // The layer default would slide the expiry on every request.
                session.set_expiry(Some(Expiry::AtDateTime(deadline)));
                AuthContext::new(Some(user_id))
            } else {
                tracing::debug!(user_id = %user_id, "session names an unknown user");
                AuthContext::default()
            }
        }
        None => AuthContext::default(),
    };

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

/// Login gate for protected routes.
///
/// Anonymous callers are sent to the login page; for a `GET` the requested
/// path is remembered so login can return there. Authenticated pages are
/// never cached.
pub async fn require_auth(session: Session, req: Request, next: Next) -> Result<Response, AppError> {
    let authenticated = req
        .extensions()
        .get::<AuthContext>()
        .is_some_and(AuthContext::is_authenticated);

    if !authenticated {
        if *req.method() == Method::GET {
            let path = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str())
                .unwrap_or("/");
            if is_local_path(path) {
                session.insert(keys::REDIRECT_AFTER_LOGIN, path).await?;
            }
        }
        return Ok(Redirect::to("/user/login").into_response());
    }

    let mut res = next.run(req).await;
    res.headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(res)
}

/// Only same-site absolute paths are accepted as post-login targets.
pub fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.starts_with("/\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_paths() {
        assert!(is_local_path("/snippet/create"));
        assert!(is_local_path("/snippet/create?draft=1"));
        assert!(!is_local_path("//evil.example/"));
        assert!(!is_local_path("/\\evil.example/"));
        assert!(!is_local_path("https://evil.example/"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn panic_response_closes_connection() {
        let res = handle_panic(Box::new("boom"));
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.headers()[header::CONNECTION], "close");
    }
}
