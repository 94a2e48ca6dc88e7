//! Subscription status as reported by the billing provider.

use serde::{Deserialize, Serialize};

use super::SubscriptionTier;

/// Lifecycle status of a Stripe subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Trialing,
    PastDue,
    Canceled,
    Unpaid,
    Incomplete,
    IncompleteExpired,
    Paused,
    /// A status this application does not know about; the raw value is kept.
    Unknown(String),
}

impl SubscriptionStatus {
    /// Parses the provider's status string. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "active" => SubscriptionStatus::Active,
            "trialing" => SubscriptionStatus::Trialing,
            "past_due" => SubscriptionStatus::PastDue,
            "canceled" => SubscriptionStatus::Canceled,
            "unpaid" => SubscriptionStatus::Unpaid,
            "incomplete" => SubscriptionStatus::Incomplete,
            "incomplete_expired" => SubscriptionStatus::IncompleteExpired,
            "paused" => SubscriptionStatus::Paused,
            other => SubscriptionStatus::Unknown(other.to_string()),
        }
    }

    /// Value stored in the `subscription_status` column.
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Trialing => "trialing",
            SubscriptionStatus::PastDue => "past_due",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Unpaid => "unpaid",
            SubscriptionStatus::Incomplete => "incomplete",
            SubscriptionStatus::IncompleteExpired => "incomplete_expired",
            SubscriptionStatus::Paused => "paused",
            SubscriptionStatus::Unknown(raw) => raw,
        }
    }

    /// Tier the account should move to when the subscription enters this
    /// status, or `None` when the current tier is kept.
    ///
    /// Past-due and incomplete subscriptions keep whatever the user had so
    /// a retried payment doesn't bounce them between tiers.
    pub fn implied_tier(&self) -> Option<SubscriptionTier> {
        match self {
            SubscriptionStatus::Active | SubscriptionStatus::Trialing => {
                Some(SubscriptionTier::Pro)
            }
            SubscriptionStatus::Canceled | SubscriptionStatus::Unpaid => {
                Some(SubscriptionTier::Free)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_known_values() {
        for raw in [
            "active",
            "trialing",
            "past_due",
            "canceled",
            "unpaid",
            "incomplete",
            "incomplete_expired",
            "paused",
        ] {
            assert_eq!(SubscriptionStatus::parse(raw).as_str(), raw);
        }
    }

    #[test]
    fn unknown_status_keeps_raw_value() {
        let status = SubscriptionStatus::parse("on_hold");
        assert_eq!(status, SubscriptionStatus::Unknown("on_hold".to_string()));
        assert_eq!(status.as_str(), "on_hold");
    }

    #[test]
    fn active_and_trialing_grant_pro() {
        assert_eq!(SubscriptionStatus::Active.implied_tier(), Some(SubscriptionTier::Pro));
        assert_eq!(SubscriptionStatus::Trialing.implied_tier(), Some(SubscriptionTier::Pro));
    }

    #[test]
    fn canceled_and_unpaid_drop_to_free() {
        assert_eq!(SubscriptionStatus::Canceled.implied_tier(), Some(SubscriptionTier::Free));
        assert_eq!(SubscriptionStatus::Unpaid.implied_tier(), Some(SubscriptionTier::Free));
    }

    #[test]
    fn other_statuses_leave_tier_alone() {
        assert_eq!(SubscriptionStatus::PastDue.implied_tier(), None);
        assert_eq!(SubscriptionStatus::Incomplete.implied_tier(), None);
        assert_eq!(SubscriptionStatus::parse("weird").implied_tier(), None);
    }
}
