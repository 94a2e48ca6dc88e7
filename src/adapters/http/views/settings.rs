//! Account settings.

use handlebars::RenderError;
use serde_json::json;

use crate::domain::account::User;
use crate::domain::subscription::SubscriptionTier;

use super::{options, Nav, Views};

const CURRENCIES: [&str; 8] = ["USD", "EUR", "GBP", "CHF", "AUD", "CAD", "JPY", "NZD"];

/// Banner shown after returning from Stripe checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Succeeded,
    Canceled,
}

impl Views {
    pub fn settings_page(
        &self,
        user: &User,
        csrf_token: &str,
        outcome: Option<CheckoutOutcome>,
        allow_debug_tier: bool,
    ) -> Result<String, RenderError> {
        // Unknown stored codes still show up as the selected option.
        let current = user.currency.as_str();
        let mut codes: Vec<&str> = CURRENCIES.to_vec();
        if !codes.contains(&current) {
            codes.push(current);
        }

        let tiers = [SubscriptionTier::Free.as_str(), SubscriptionTier::Pro.as_str()];
        let status = user.subscription_status.as_deref().filter(|s| !s.is_empty());

        self.page(
            "settings",
            "Settings",
            Nav::signed_in(user),
            csrf_token,
            json!({
                "succeeded": outcome == Some(CheckoutOutcome::Succeeded),
                "canceled": outcome == Some(CheckoutOutcome::Canceled),
                "currencies": options(codes, current),
                "plan": user.subscription_tier.display_name(),
                "status": status,
                "has_billing_account": user.has_billing_account(),
                "is_pro": user.is_pro(),
                "allow_debug_tier": allow_debug_tier,
                "tiers": options(tiers, user.subscription_tier.as_str()),
            }),
        )
    }
}
