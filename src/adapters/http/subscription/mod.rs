//! HTTP adapter for Stripe billing.
//!
//! - `GET|POST /create-checkout-session` - Redirect to hosted checkout
//! - `GET|POST /create-portal-session` - Redirect to the billing portal
//! - `POST /webhook` - Stripe webhook, verified by signature

pub mod handlers;
pub mod routes;

pub use routes::{subscription_protected_routes, webhook_routes, WEBHOOK_BODY_LIMIT};
