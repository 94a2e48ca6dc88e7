//! HandlePaymentWebhookHandler - Command handler for Stripe webhooks.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{SubscriptionChange, SubscriptionError, SubscriptionStatus};
use crate::ports::{
    PaymentProvider, SubscriberLookup, UserRepository, WebhookEvent, WebhookEventData,
    WebhookEventType,
};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload.
    pub payload: Vec<u8>,
    /// `Stripe-Signature` header.
    pub signature: String,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Checkout completed, user upgraded to Pro.
    Upgraded { user_id: UserId },
    /// Subscription status changed; the tier follows the status.
    StatusChanged {
        user_id: UserId,
        status: SubscriptionStatus,
    },
    /// Subscription ended, user back on the free tier.
    Downgraded { user_id: UserId },
    /// Verified event for a user we don't know. Acknowledged so Stripe
    /// stops retrying.
    SubscriberNotFound,
    /// Event type we don't act on.
    Ignored,
}

/// Verifies the signature, then writes the subscription columns the
/// event implies.
pub struct HandlePaymentWebhookHandler {
    users: Arc<dyn UserRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(users: Arc<dyn UserRepository>, payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self {
            users,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, SubscriptionError> {
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook verification failed");
                SubscriptionError::invalid_webhook(e.message)
            })?;

        tracing::info!(event_id = %event.id, event_type = ?event.event_type, "Webhook received");

        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => self.checkout_completed(&event).await,
            WebhookEventType::SubscriptionUpdated => self.subscription_updated(&event).await,
            WebhookEventType::SubscriptionDeleted => self.subscription_deleted(&event).await,
            WebhookEventType::Unknown(ref kind) => {
                tracing::debug!(event_type = %kind, "Ignoring webhook event");
                Ok(HandlePaymentWebhookResult::Ignored)
            }
        }
    }

    async fn checkout_completed(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, SubscriptionError> {
        let WebhookEventData::Checkout {
            customer_id,
            subscription_id,
            client_reference_id,
            ..
        } = &event.data
        else {
            return Err(SubscriptionError::invalid_webhook("checkout event without session data"));
        };

        let Some(customer_id) = customer_id.as_deref().filter(|c| !c.is_empty()) else {
            tracing::warn!(event_id = %event.id, "Checkout completed without a customer");
            return Ok(HandlePaymentWebhookResult::SubscriberNotFound);
        };

        let change = SubscriptionChange::checkout_completed(customer_id, subscription_id.clone());

        let referenced_user = client_reference_id
            .as_deref()
            .and_then(|raw| raw.parse::<UserId>().ok());

        let mut updated = None;
        if let Some(user_id) = referenced_user {
            updated = self
                .users
                .apply_subscription_change(&SubscriberLookup::User(user_id), &change)
                .await?;
        }
        if updated.is_none() {
            updated = self
                .users
                .apply_subscription_change(
                    &SubscriberLookup::StripeCustomer(customer_id.to_string()),
                    &change,
                )
                .await?;
        }

        Ok(match updated {
            Some(user_id) => {
                tracing::info!(user_id = %user_id, customer_id, "User upgraded to Pro");
                HandlePaymentWebhookResult::Upgraded { user_id }
            }
            None => self.not_found(event, customer_id),
        })
    }

    async fn subscription_updated(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, SubscriptionError> {
        let (customer_id, status) = subscription_fields(event)?;
        let change = SubscriptionChange::status_changed(status.clone());

        let updated = self
            .users
            .apply_subscription_change(&SubscriberLookup::StripeCustomer(customer_id.to_string()), &change)
            .await?;

        Ok(match updated {
            Some(user_id) => {
                tracing::info!(user_id = %user_id, status = status.as_str(), tier = ?change.tier, "Subscription status updated");
                HandlePaymentWebhookResult::StatusChanged { user_id, status }
            }
            None => self.not_found(event, customer_id),
        })
    }

    async fn subscription_deleted(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, SubscriptionError> {
        let (customer_id, _) = subscription_fields(event)?;

        let updated = self
            .users
            .apply_subscription_change(
                &SubscriberLookup::StripeCustomer(customer_id.to_string()),
                &SubscriptionChange::subscription_deleted(),
            )
            .await?;

        Ok(match updated {
            Some(user_id) => {
                tracing::info!(user_id = %user_id, "Subscription ended, user downgraded");
                HandlePaymentWebhookResult::Downgraded { user_id }
            }
            None => self.not_found(event, customer_id),
        })
    }

    fn not_found(&self, event: &WebhookEvent, customer_id: &str) -> HandlePaymentWebhookResult {
        tracing::warn!(event_id = %event.id, customer_id, "Webhook for unknown subscriber");
        HandlePaymentWebhookResult::SubscriberNotFound
    }
}

fn subscription_fields(
    event: &WebhookEvent,
) -> Result<(&str, SubscriptionStatus), SubscriptionError> {
    match &event.data {
        WebhookEventData::Subscription {
            customer_id,
            status,
            ..
        } => Ok((customer_id.as_str(), status.clone())),
        _ => Err(SubscriptionError::invalid_webhook(
            "subscription event without subscription data",
        )),
    }
}
