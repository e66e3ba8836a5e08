use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};

use crate::middleware::require_auth;

pub mod snippets;
pub mod system;
pub mod users;

/// Router for every page that needs a session.
///
/// The protected half sits behind the login gate; both halves expect the
/// session, CSRF and authentication layers to be applied by the caller.
pub fn router() -> Router {
    let public = Router::new()
        .route("/", get(snippets::home))
        .route("/snippet/view/:id", get(snippets::view))
        .route("/user/signup", get(users::signup_form).post(users::signup))
        .route("/user/login", get(users::login_form).post(users::login));

    let protected = Router::new()
        .route(
            "/snippet/create",
            get(snippets::create_form).post(snippets::create),
        )
        .route("/user/logout", post(users::logout))
        .route_layer(from_fn(require_auth));

    public.merge(protected)
}
