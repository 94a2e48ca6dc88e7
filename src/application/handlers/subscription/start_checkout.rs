//! StartCheckoutHandler - Command handler for starting a Pro checkout.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::SubscriptionError;
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentProvider, UserRepository};

use super::provider_error;

#[derive(Debug, Clone)]
pub struct StartCheckoutCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct StartCheckoutResult {
    pub session: CheckoutSession,
}

/// Creates a hosted checkout for the configured Pro price. The user stays
/// on the free tier until the `checkout.session.completed` webhook arrives.
pub struct StartCheckoutHandler {
    users: Arc<dyn UserRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
    base_url: String,
}

impl StartCheckoutHandler {
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
        cmd: StartCheckoutCommand,
    ) -> Result<StartCheckoutResult, SubscriptionError> {
        let user = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or(SubscriptionError::UserNotFound(cmd.user_id))?;

        let request = CreateCheckoutRequest {
            user_id: user.id,
            email: user.email.as_str().to_string(),
            success_url: format!("{}/settings?success=true", self.base_url),
            cancel_url: format!("{}/settings?canceled=true", self.base_url),
        };

        let session = self
            .payment_provider
            .create_checkout_session(request)
            .await
            .map_err(provider_error)?;

        tracing::info!(user_id = %user.id, session_id = %session.id, "Checkout session created");
        Ok(StartCheckoutResult { session })
    }
}
