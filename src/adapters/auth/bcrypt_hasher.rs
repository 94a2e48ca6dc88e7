//! bcrypt password hashing.

use crate::domain::foundation::AuthError;
use crate::ports::{PasswordCheck, PasswordHasher};

pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Hashes with a fixed work factor. Hashes stored at a higher cost verify
/// fine but are flagged for rehashing, which brings old accounts down to
/// the configured cost on their next login.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

/// Work factor of a modular-crypt bcrypt hash (`$2b$12$...`).
fn stored_cost(hash: &str) -> Option<u32> {
    hash.split('$').nth(2)?.parse().ok()
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AuthError::service_unavailable(format!("bcrypt: {}", e)))
    }

    fn verify(&self, password: &str, hash: &str) -> PasswordCheck {
        match bcrypt::verify(password, hash) {
            Ok(true) => match stored_cost(hash) {
                Some(cost) if cost > self.cost => PasswordCheck::MatchNeedsRehash,
                _ => PasswordCheck::Match,
            },
            Ok(false) => PasswordCheck::Mismatch,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not valid bcrypt");
                PasswordCheck::Mismatch
            }
        }
    }
}
