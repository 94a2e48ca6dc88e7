//! SignUpHandler - Command handler for creating an account.

use std::sync::Arc;

use crate::domain::account::{AccountError, Credentials, SignupPlan, User};
use crate::ports::{PasswordHasher, UserRepository};

use super::password;

/// Command to create an account.
#[derive(Clone)]
pub struct SignUpCommand {
    pub email: String,
    pub password: String,
    pub plan: SignupPlan,
}

/// Where the new user goes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpNext {
    /// Free plan: log in with the new credentials.
    LogIn,
    /// Pro plan: signed in straight away and sent to checkout.
    Checkout,
}

#[derive(Debug, Clone)]
pub struct SignUpResult {
    pub user: User,
    pub next: SignUpNext,
}

/// Every account starts on the free tier. Picking Pro only changes where the
/// user lands afterwards; the tier flips once the payment webhook arrives.
pub struct SignUpHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl SignUpHandler {
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: SignUpCommand) -> Result<SignUpResult, AccountError> {
        let credentials = Credentials::for_signup(&cmd.email, &cmd.password)?;

        let password_hash = password::hash(&self.hasher, &credentials.password).await?;
        let user = User::new(credentials.email, password_hash);

        self.users.create(&user).await?;

        tracing::info!(user_id = %user.id, plan = ?cmd.plan, "User signed up");

        let next = match cmd.plan {
            SignupPlan::Pro => SignUpNext::Checkout,
            SignupPlan::Free => SignUpNext::LogIn,
        };
        Ok(SignUpResult { user, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support;
    use crate::domain::subscription::SubscriptionTier;
    use crate::ports::PasswordCheck;

    fn command(email: &str, plan: SignupPlan) -> SignUpCommand {
        SignUpCommand {
            email: email.to_string(),
            password: "long-enough-password".to_string(),
            plan,
        }
    }

    #[tokio::test]
    async fn creates_free_user_with_hashed_password() {
        let store = test_support::store();
        let hasher = test_support::hasher();
        let handler = SignUpHandler::new(store.clone(), hasher.clone());

        let result = handler
            .handle(command("New@Example.com", SignupPlan::Free))
            .await
            .unwrap();

        assert_eq!(result.next, SignUpNext::LogIn);
        assert_eq!(result.user.email.as_str(), "new@example.com");
        assert_eq!(result.user.subscription_tier, SubscriptionTier::Free);
        assert_eq!(
            hasher.verify("long-enough-password", &result.user.password_hash),
            PasswordCheck::Match
        );
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn pro_plan_goes_to_checkout_but_starts_free() {
        let handler = SignUpHandler::new(test_support::store(), test_support::hasher());

        let result = handler
            .handle(command("pro@example.com", SignupPlan::Pro))
            .await
            .unwrap();

        assert_eq!(result.next, SignUpNext::Checkout);
        assert!(!result.user.is_pro());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = test_support::store();
        let handler = SignUpHandler::new(store.clone(), test_support::hasher());
        handler
            .handle(command("taken@example.com", SignupPlan::Free))
            .await
            .unwrap();

        let err = handler
            .handle(command("TAKEN@example.com", SignupPlan::Free))
            .await
            .unwrap_err();

        assert_eq!(err, AccountError::EmailTaken);
        assert_eq!(err.message(), "Email already exists");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn short_password_is_a_validation_error() {
        let handler = SignUpHandler::new(test_support::store(), test_support::hasher());

        let err = handler
            .handle(SignUpCommand {
                email: "a@example.com".to_string(),
                password: "short".to_string(),
                plan: SignupPlan::Free,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::ValidationFailed { ref field, .. } if field == "password"));
    }
}
