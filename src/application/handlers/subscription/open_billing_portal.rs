//! OpenBillingPortalHandler - Command handler for the Stripe billing portal.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionError;
use crate::ports::{PaymentProvider, PortalSession, UserRepository};

use super::provider_error;

#[derive(Debug, Clone)]
pub struct OpenBillingPortalCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct OpenBillingPortalResult {
    pub session: PortalSession,
}

/// Only users who completed a checkout have a Stripe customer to manage.
pub struct OpenBillingPortalHandler {
    users: Arc<dyn UserRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    base_url: String,
}

impl OpenBillingPortalHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            users,
            payment_provider,
            base_url: base_url.into(),
        }
    }

    pub async fn handle(
        &self,
        cmd: OpenBillingPortalCommand,
    ) -> Result<OpenBillingPortalResult, SubscriptionError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(SubscriptionError::UserNotFound(cmd.user_id))?;

        let customer_id = match user.stripe_customer_id.as_deref() {
            Some(id) if user.has_billing_account() => id,
            _ => return Err(SubscriptionError::NoBillingAccount),
        };

        let return_url = format!("{}/settings", self.base_url);
        let session = self
            .payment_provider
            .create_portal_session(customer_id, &return_url)
            .await
            .map_err(provider_error)?;

        tracing::info!(user_id = %user.id, "Billing portal session created");
        Ok(OpenBillingPortalResult { session })
    }
}
