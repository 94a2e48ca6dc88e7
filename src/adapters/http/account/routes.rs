//! Axum routes for account pages.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    delete_account, export_cellar, log_in, log_in_page, log_out, settings_page, sign_up,
    sign_up_page, update_settings,
};
use crate::adapters::http::state::AppState;

/// Routes reachable without a session.
///
/// - `GET|POST /signup`
/// - `GET|POST /login`
/// - `GET /logout`
pub fn account_public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", get(sign_up_page).post(sign_up))
        .route("/login", get(log_in_page).post(log_in))
        .route("/logout", get(log_out))
}

/// Routes that need a signed-in user.
///
/// - `GET|POST /settings`
/// - `GET /export`
/// - `POST /delete-account`
pub fn account_protected_routes() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings_page).post(update_settings))
        .route("/export", get(export_cellar))
        .route("/delete-account", post(delete_account))
}
