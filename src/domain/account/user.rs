//! User aggregate.

use serde::Serialize;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{SubscriptionTier, TierLimits};

use super::{Currency, Email};

/// An account holder and the owner of a cellar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    #[serde(skip)]
    pub password_hash: String,
    pub currency: Currency,
    pub subscription_tier: SubscriptionTier,
    pub subscription_status: Option<String>,
    pub stripe_customer_id: Option<String>,
    pub subscription_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// A freshly signed-up free user.
    pub fn new(email: Email, password_hash: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: UserId::new(),
            email,
            password_hash: password_hash.into(),
            currency: Currency::default(),
            subscription_tier: SubscriptionTier::Free,
            subscription_status: None,
            stripe_customer_id: None,
            subscription_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pro(&self) -> bool {
        self.subscription_tier.is_paid()
    }

    pub fn limits(&self) -> TierLimits {
        TierLimits::for_tier(self.subscription_tier)
    }

    /// True once a checkout has attached a Stripe customer.
    pub fn has_billing_account(&self) -> bool {
        self.stripe_customer_id
            .as_deref()
            .map(|id| !id.is_empty())
            .unwrap_or(false)
    }
}
