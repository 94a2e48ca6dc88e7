//! Axum routes for billing endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{create_checkout_session, create_portal_session, handle_stripe_webhook};
use crate::adapters::http::state::AppState;

/// Largest webhook payload accepted.
pub const WEBHOOK_BODY_LIMIT: usize = 64 * 1024;

/// Checkout and portal redirects. Both accept GET so plain links work.
pub fn subscription_protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/create-checkout-session",
            get(create_checkout_session).post(create_checkout_session),
        )
        .route(
            "/create-portal-session",
            get(create_portal_session).post(create_portal_session),
        )
}

/// The Stripe webhook. No session; the signature authenticates the caller.
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route(
        "/webhook",
        post(handle_stripe_webhook).layer(DefaultBodyLimit::max(WEBHOOK_BODY_LIMIT)),
    )
}
