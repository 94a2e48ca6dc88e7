//! Session manager port.
//!
//! Issues and validates the opaque token stored in the session cookie.

use crate::domain::foundation::{AuthError, AuthenticatedUser};

pub trait SessionManager: Send + Sync {
    /// Creates a token for a freshly authenticated user.
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;

    /// # Errors
    ///
    /// - `InvalidToken` for tampered or malformed tokens
    /// - `TokenExpired` once the session has aged out
    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;

    /// Lifetime of issued tokens, used for the cookie `Max-Age`.
    fn max_age_secs(&self) -> i64;
}
