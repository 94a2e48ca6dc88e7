//! HTTP adapter for accounts.
//!
//! - `GET|POST /signup` - Create an account, optionally heading to checkout
//! - `GET|POST /login` - Start a session
//! - `GET /logout` - End the session
//! - `GET|POST /settings` - Currency, plan and (in development) tier override
//! - `GET /export` - Download the cellar as CSV
//! - `POST /delete-account` - Remove the account and every wine in it

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{account_protected_routes, account_public_routes};
