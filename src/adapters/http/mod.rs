//! HTTP adapter - server-rendered pages over axum.
//!
//! Each feature has its own module with handlers and routes:
//!
//! - `account` - signup, login, settings, export, account deletion
//! - `cellar` - wines, reviews and tasting notes
//! - `subscription` - Stripe checkout, billing portal and webhook
//!
//! Shared pieces live beside them: `state` (ports and handler factories),
//! `error` (status mapping), `middleware` (sessions and CSRF) and `views` (handlebars pages).

pub mod account;
pub mod cellar;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod subscription;
pub mod views;

pub use error::AppError;
pub use router::{app_router, health, with_http_layers, MAX_UPLOAD_BYTES};
pub use state::{AppState, HttpSettings};
pub use views::Views;
