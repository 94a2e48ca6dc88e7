//! User repository port.
//!
//! Users own everything else, so deleting one goes through
//! [`UserRepository::delete_with_wines`] rather than a bare row delete.

use crate::domain::account::{Currency, User};
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{SubscriptionChange, SubscriptionTier};
use async_trait::async_trait;

/// Which user a subscription change should land on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriberLookup {
    User(UserId),
    StripeCustomer(String),
}

/// Repository port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Emails are stored lowercased; callers pass a parsed `Email`.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_stripe_customer_id(
        &self,
        customer_id: &str,
    ) -> Result<Option<User>, DomainError>;

    async fn update_password_hash(&self, id: &UserId, hash: &str) -> Result<(), DomainError>;

    async fn update_currency(&self, id: &UserId, currency: &Currency) -> Result<(), DomainError>;

    /// Sets the tier directly. Only used by the development tier override.
    async fn update_tier(&self, id: &UserId, tier: SubscriptionTier) -> Result<(), DomainError>;

    /// Writes a billing change to the matching user.
    ///
    /// Returns the affected user id, or `None` when nobody matched.
    async fn apply_subscription_change(
        &self,
        lookup: &SubscriberLookup,
        change: &SubscriptionChange,
    ) -> Result<Option<UserId>, DomainError>;

    /// Deletes the user's wines, their reviews and tasting notes, then the
    /// user, in one transaction.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    async fn delete_with_wines(&self, id: &UserId) -> Result<(), DomainError>;
}
