//! Tier-based feature limits.
//!
//! Defines what a user may do in their cellar based on their subscription.

use super::SubscriptionTier;
use serde::{Deserialize, Serialize};

/// Maximum number of wines a free account may hold.
pub const FREE_TIER_WINE_LIMIT: u32 = 10;

/// Feature limits for a subscription tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    pub tier: SubscriptionTier,
    /// Maximum wines in the cellar. None = unlimited.
    pub max_wines: Option<u32>,
    pub reviews_enabled: bool,
    pub tasting_notes_enabled: bool,
    /// Keyword search and column filters on the list view.
    pub search_enabled: bool,
}

impl TierLimits {
    /// | Tier | Wines | Reviews | Tasting notes | Search |
    /// |------|-------|---------|---------------|--------|
    /// | Free | 10 | No | No | No |
    /// | Pro | Unlimited | Yes | Yes | Yes |
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                tier,
                max_wines: Some(FREE_TIER_WINE_LIMIT),
                reviews_enabled: false,
                tasting_notes_enabled: false,
                search_enabled: false,
            },
            SubscriptionTier::Pro => Self {
                tier,
                max_wines: None,
                reviews_enabled: true,
                tasting_notes_enabled: true,
                search_enabled: true,
            },
        }
    }

    /// True when adding another wine would exceed the tier's allowance.
    pub fn wine_limit_reached(&self, current_wines: u32) -> bool {
        self.max_wines
            .map(|max| current_wines >= max)
            .unwrap_or(false)
    }
}
