//! LogInHandler - Command handler for password login.

use std::sync::Arc;

use crate::domain::account::{AccountError, Email, User};
use crate::ports::{PasswordCheck, PasswordHasher, UserRepository};

use super::password;

#[derive(Clone)]
pub struct LogInCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LogInResult {
    pub user: User,
    /// The stored hash was upgraded to the configured cost.
    pub rehashed: bool,
}

/// Checks credentials. Unknown email and wrong password are
/// indistinguishable to the caller.
pub struct LogInHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl LogInHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: LogInCommand) -> Result<LogInResult, AccountError> {
        let email = Email::parse(&cmd.email).map_err(|_| AccountError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(email.as_str())
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let check = password::verify(&self.hasher, &cmd.password, &user.password_hash).await?;
        if !check.is_match() {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        let rehashed = check == PasswordCheck::MatchNeedsRehash && self.rehash(&user, &cmd.password).await;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(LogInResult { user, rehashed })
    }

    /// Failures are logged and otherwise ignored; the login still succeeds.
    async fn rehash(&self, user: &User, plain: &str) -> bool {
        let new_hash = match password::hash(&self.hasher, plain).await {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password rehash failed");
                return false;
            }
        };
        match self.users.update_password_hash(&user.id, &new_hash).await {
            Ok(()) => {
                tracing::info!(user_id = %user.id, "Password hash upgraded");
                true
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to store rehashed password");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptPasswordHasher;
    use crate::adapters::memory::InMemoryCellar;
    use crate::application::handlers::test_support;

    async fn store_with_user(hash_cost: u32) -> Arc<InMemoryCellar> {
        let store = test_support::store();
        let hash = BcryptPasswordHasher::new(hash_cost).hash("correct-horse").unwrap();
        let user = User::new(Email::parse("wine@example.com").unwrap(), hash);
        UserRepository::create(store.as_ref(), &user).await.unwrap();
        store
    }

    fn command(email: &str, password: &str) -> LogInCommand {
        LogInCommand {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn correct_password_logs_in() {
        let store = store_with_user(test_support::TEST_BCRYPT_COST).await;
        let handler = LogInHandler::new(store, test_support::hasher());

        let result = handler
            .handle(command(" Wine@Example.com ", "correct-horse"))
            .await
            .unwrap();

        assert_eq!(result.user.email.as_str(), "wine@example.com");
        assert!(!result.rehashed);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let store = store_with_user(test_support::TEST_BCRYPT_COST).await;
        let handler = LogInHandler::new(store, test_support::hasher());

        let wrong = handler
            .handle(command("wine@example.com", "battery-staple"))
            .await
            .unwrap_err();
        let unknown = handler
            .handle(command("nobody@example.com", "correct-horse"))
            .await
            .unwrap_err();
        let malformed = handler.handle(command("not-an-email", "x")).await.unwrap_err();

        assert_eq!(wrong, AccountError::InvalidCredentials);
        assert_eq!(unknown, AccountError::InvalidCredentials);
        assert_eq!(malformed, AccountError::InvalidCredentials);
        assert_eq!(wrong.message(), "Invalid credentials");
    }

    #[tokio::test]
    async fn costlier_stored_hash_is_rehashed_at_configured_cost() {
        let store = store_with_user(test_support::TEST_BCRYPT_COST + 1).await;
        let handler = LogInHandler::new(store.clone(), test_support::hasher());

        let result = handler
            .handle(command("wine@example.com", "correct-horse"))
            .await
            .unwrap();

        assert!(result.rehashed);
        let stored = store
            .find_by_email("wine@example.com")
            .await
            .unwrap()
            .unwrap();
        assert!(stored.password_hash.starts_with("$2b$04$"));
        assert_eq!(
            test_support::hasher().verify("correct-horse", &stored.password_hash),
            PasswordCheck::Match
        );
    }
}
