//! UpdateSettingsHandler - Command handler for the settings form.

use std::sync::Arc;

use crate::domain::account::{AccountError, Currency};
use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionTier;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct UpdateSettingsCommand {
    pub user_id: UserId,
    pub currency: String,
    /// Tier override from the development-only form field.
    pub debug_tier: Option<String>,
    /// True only when running in development.
    pub allow_debug_tier: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateSettingsResult {
    CurrencyUpdated(Currency),
    TierOverridden(SubscriptionTier),
}

pub struct UpdateSettingsHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateSettingsHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: UpdateSettingsCommand,
    ) -> Result<UpdateSettingsResult, AccountError> {
        let debug_tier = cmd
            .debug_tier
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && cmd.allow_debug_tier);

        if let Some(raw) = debug_tier {
            let tier: SubscriptionTier = raw.parse()?;
            self.users.update_tier(&cmd.user_id, tier).await?;
            tracing::info!(user_id = %cmd.user_id, tier = tier.as_str(), "Debug tier override");
            return Ok(UpdateSettingsResult::TierOverridden(tier));
        }

        let currency = Currency::parse(&cmd.currency)?;
        self.users.update_currency(&cmd.user_id, &currency).await?;
        Ok(UpdateSettingsResult::CurrencyUpdated(currency))
    }
}
