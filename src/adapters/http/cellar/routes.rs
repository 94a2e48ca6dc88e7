//! Axum routes for cellar pages.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    add_review, add_tasting_note, add_wine, add_wine_page, delete_review, delete_tasting_note,
    delete_wine, edit_review, edit_wine, edit_wine_page, home, update_quantity, wine_details,
};
use crate::adapters::http::state::AppState;

/// `GET /` renders for visitors too.
pub fn cellar_public_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}

/// Routes that need a signed-in user.
pub fn cellar_protected_routes() -> Router<AppState> {
    Router::new()
        // Wines
        .route("/add", get(add_wine_page).post(add_wine))
        .route("/details/:id", get(wine_details))
        .route("/edit/:id", get(edit_wine_page).post(edit_wine))
        .route("/update-quantity", post(update_quantity))
        .route("/delete", post(delete_wine))
        // Reviews
        .route("/add-review", post(add_review))
        .route("/edit-review", post(edit_review))
        .route("/delete-review", post(delete_review))
        // Tasting notes
        .route("/add-tasting-note", post(add_tasting_note))
        .route("/delete-tasting-note", post(delete_tasting_note))
}
