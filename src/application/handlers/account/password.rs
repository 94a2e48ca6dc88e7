//! Password hashing off the async executor.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::ports::{PasswordCheck, PasswordHasher};

pub(super) async fn hash(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
) -> Result<String, AccountError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| AccountError::infrastructure(format!("hash task failed: {}", e)))?
        .map_err(|e| AccountError::infrastructure(e.to_string()))
}

pub(super) async fn verify(
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
    stored_hash: &str,
) -> Result<PasswordCheck, AccountError> {
    let hasher = Arc::clone(hasher);
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();
    tokio::task::spawn_blocking(move || hasher.verify(&password, &stored_hash))
        .await
        .map_err(|e| AccountError::infrastructure(format!("verify task failed: {}", e)))
}
