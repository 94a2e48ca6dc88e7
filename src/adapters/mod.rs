//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - bcrypt password hashing and signed session cookies
//! - `http` - axum routes, middleware and HTML views
//! - `memory` - in-memory repositories for tests and local runs
//! - `postgres` - sqlx repositories, migrations and demo seed
//! - `storage` - label images in R2 or inline as data URLs
//! - `stripe` - checkout, billing portal and webhook verification

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod stripe;
