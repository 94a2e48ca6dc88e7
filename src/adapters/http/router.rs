//! Top-level router.
//!
//! ```text
//! /health                      always open
//! /, /signup, /login, /logout  open, session optional
//! /webhook                     open, Stripe signature checked
//! everything else              require_session → redirect to /login
//! ```
//!
//! Every route except `/webhook` runs behind `csrf_middleware`, so any
//! POST from a page must carry the form token.

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::account::{account_protected_routes, account_public_routes};
use super::cellar::{cellar_protected_routes, cellar_public_routes};
use super::middleware::{csrf_middleware, require_session, session_middleware, CsrfState};
use super::state::AppState;
use super::subscription::{subscription_protected_routes, webhook_routes};

/// Largest request body, sized for label photos.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// GET /health
pub async fn health() -> &'static str {
    "OK"
}

/// Every route of the application, with sessions resolved.
pub fn app_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(cellar_protected_routes())
        .merge(account_protected_routes())
        .merge(subscription_protected_routes())
        .route_layer(middleware::from_fn(require_session));

    let csrf = CsrfState {
        tokens: state.csrf.clone(),
        secure_cookies: state.settings.secure_cookies,
    };

    Router::new()
        .route("/health", get(health))
        .merge(cellar_public_routes())
        .merge(account_public_routes())
        .merge(protected)
        .layer(middleware::from_fn_with_state(csrf, csrf_middleware))
        .merge(webhook_routes())
        .layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}

/// Tracing, request ids, compression and a per-request timeout.
pub fn with_http_layers(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CompressionLayer::new())
            .layer(TimeoutLayer::new(request_timeout)),
    )
}
