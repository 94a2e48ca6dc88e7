//! Subscription field updates produced by billing events.
//!
//! A webhook never rewrites the whole user record. It produces one of these
//! changes, and the repository writes exactly the columns it names.

use super::{SubscriptionStatus, SubscriptionTier};

/// Column-level update to a user's subscription fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionChange {
    /// New tier, or `None` to keep the current one.
    pub tier: Option<SubscriptionTier>,
    pub status: SubscriptionStatus,
    /// New Stripe customer id, or `None` to keep the current one.
    pub stripe_customer_id: Option<String>,
    pub subscription_id: SubscriptionIdUpdate,
}

/// What to do with the stored subscription id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionIdUpdate {
    Keep,
    Set(String),
    Clear,
}

impl SubscriptionChange {
    /// Checkout finished: the user is now a paying Pro subscriber.
    pub fn checkout_completed(customer_id: impl Into<String>, subscription_id: Option<String>) -> Self {
        Self {
            tier: Some(SubscriptionTier::Pro),
            status: SubscriptionStatus::Active,
            stripe_customer_id: Some(customer_id.into()),
            subscription_id: subscription_id
                .map(SubscriptionIdUpdate::Set)
                .unwrap_or(SubscriptionIdUpdate::Keep),
        }
    }

    /// Subscription status changed; tier follows [`SubscriptionStatus::implied_tier`].
    pub fn status_changed(status: SubscriptionStatus) -> Self {
        Self {
            tier: status.implied_tier(),
            status,
            stripe_customer_id: None,
            subscription_id: SubscriptionIdUpdate::Keep,
        }
    }

    /// Subscription ended: back to free.
    pub fn subscription_deleted() -> Self {
        Self {
            tier: Some(SubscriptionTier::Free),
            status: SubscriptionStatus::Canceled,
            stripe_customer_id: None,
            subscription_id: SubscriptionIdUpdate::Clear,
        }
    }
}
