//! Subscription domain - tiers, limits and billing status.
//!
//! The tier on the user record is the single switch that gates Pro
//! features. Billing webhooks are translated into [`SubscriptionChange`]
//! values before anything is written.

mod change;
mod errors;
mod status;
mod tier;
mod tier_limits;

pub use change::{SubscriptionChange, SubscriptionIdUpdate};
pub use errors::SubscriptionError;
pub use status::SubscriptionStatus;
pub use tier::SubscriptionTier;
pub use tier_limits::{TierLimits, FREE_TIER_WINE_LIMIT};
