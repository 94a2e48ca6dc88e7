//! Authentication adapters.
//!
//! Implementations of the `PasswordHasher` and `SessionManager` ports:
//!
//! - `bcrypt_hasher` - bcrypt with a configurable work factor
//! - `signed_cookie_sessions` - HMAC-signed, self-contained cookie tokens
//!
//! `csrf_tokens` signs the per-session form tokens checked by the HTTP
//! layer.

mod bcrypt_hasher;
mod csrf_tokens;
mod signed_cookie_sessions;

pub use bcrypt_hasher::{BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use csrf_tokens::{CsrfTokens, CSRF_COOKIE_NAME, CSRF_FIELD_NAME, CSRF_HEADER_NAME};
pub use signed_cookie_sessions::{SignedCookieSessions, SESSION_COOKIE_NAME};
