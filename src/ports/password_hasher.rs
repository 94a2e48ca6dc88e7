//! Password hashing port.

use crate::domain::foundation::AuthError;

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Mismatch,
    Match,
    /// Correct, but the stored hash should be replaced.
    MatchNeedsRehash,
}

impl PasswordCheck {
    pub fn is_match(&self) -> bool {
        !matches!(self, PasswordCheck::Mismatch)
    }
}

/// Hashing is CPU-bound; async handlers should run it on a blocking thread.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// A malformed stored hash counts as a mismatch.
    fn verify(&self, password: &str, hash: &str) -> PasswordCheck;
}
