//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: repositories, templates and settings shared by handlers
//! - `routes/`: page handlers (one file per area)
//! - `forms.rs`: submitted forms and their validation
//! - `templates.rs`: HTML rendering
//! - `errors.rs`: error to response mapping

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, timeout::TimeoutLayer};
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer, SessionStore};

use crate::config::Settings;
use crate::middleware;

pub mod errors;
pub mod forms;
pub mod routes;
pub mod services;
pub mod templates;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the tests).
pub fn build_app<Store>(services: Arc<AppServices>, session_store: Store) -> Router
where
    Store: SessionStore + Clone,
{
    let settings = services.settings.clone();

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(settings.secure_cookies)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(settings.session_lifetime));

    // Pages: session, then CSRF, then who-is-calling.
    let dynamic = routes::router().layer(
        ServiceBuilder::new()
            .layer(session_layer)
            .layer(from_fn(middleware::csrf_protect))
            .layer(from_fn_with_state(services.clone(), middleware::authenticate))
            .layer(Extension(services)),
    );

    let app = Router::new()
        .route("/health", get(routes::system::health))
        .nest_service("/static", ServeDir::new(&settings.static_dir))
        .merge(dynamic)
        .fallback(routes::system::not_found);

    with_outer_layers(app, &settings)
}

/// Layers shared by every route, outermost first.
///
/// The log sits outside panic recovery so a recovered panic is still logged
/// as a 500 request.
pub fn with_outer_layers(router: Router, settings: &Settings) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(from_fn(middleware::log_request))
            .layer(from_fn(middleware::secure_headers))
            .layer(CatchPanicLayer::custom(middleware::handle_panic))
            .layer(TimeoutLayer::new(settings.request_timeout)),
    )
}
