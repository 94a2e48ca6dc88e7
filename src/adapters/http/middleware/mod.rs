//! HTTP middleware for axum.
//!
//! - `auth` - Session cookie middleware and extractors
//! - `csrf` - Nonce cookie and form token checks
//! - `session_cookie` - Building and reading the session cookie

pub mod auth;
pub mod csrf;
pub mod session_cookie;

pub use auth::{
    require_session, session_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth,
};
pub use csrf::{csrf_middleware, CsrfRejection, CsrfState, CsrfToken};
pub use session_cookie::{clear_session_cookie, read_cookie, session_cookie};
