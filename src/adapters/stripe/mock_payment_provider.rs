//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking
//! - Webhook event simulation

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::subscription::SubscriptionStatus;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, PortalSession,
    WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{StripeCheckoutSession, StripeSubscription, StripeWebhookEvent};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Fail the next call
/// mock.set_error(PaymentError::network("down"));
///
/// // Simulate a webhook
/// mock.set_webhook_event(MockPaymentProvider::checkout_completed_event("cus_1", "sub_1", &user_id));
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    next_webhook_event: Option<WebhookEvent>,

    /// Error to return on the next call to any method.
    next_error: Option<PaymentError>,

    call_log: Vec<MethodCall>,

    reject_webhooks: bool,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

impl MockPaymentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.state().reject_webhooks = true;
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the webhook event to return on verification.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.state().next_webhook_event = Some(event);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self) -> Result<(), PaymentError> {
        match self.state().next_error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn short_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
    }

    /// Reads a Stripe-shaped payload the way the real adapter does, minus the
    /// signature check.
    fn parse_payload(payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let event: StripeWebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| PaymentError::invalid_webhook(format!("Invalid JSON: {}", e)))?;
        let event_type = WebhookEventType::from_stripe(&event.event_type);

        let data = match &event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(event.data.object.clone())
                        .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;
                WebhookEventData::Checkout {
                    session_id: session.id,
                    customer_id: session.customer,
                    subscription_id: session.subscription,
                    client_reference_id: session.client_reference_id,
                }
            }
            WebhookEventType::SubscriptionUpdated | WebhookEventType::SubscriptionDeleted => {
                let sub: StripeSubscription = serde_json::from_value(event.data.object.clone())
                    .map_err(|e| PaymentError::invalid_webhook(e.to_string()))?;
                WebhookEventData::Subscription {
                    subscription_id: sub.id,
                    customer_id: sub.customer,
                    status: SubscriptionStatus::parse(&sub.status),
                }
            }
            WebhookEventType::Unknown(_) => WebhookEventData::Raw {
                json: event.data.object.to_string(),
            },
        };

        Ok(WebhookEvent {
            id: event.id,
            event_type,
            data,
            created_at: event.created,
        })
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        self.record_call(
            "create_checkout_session",
            vec![
                request.user_id.to_string(),
                request.email,
                request.success_url,
                request.cancel_url,
            ],
        );
        self.check_error()?;

        let id = format!("cs_mock_{}", Self::short_id());
        Ok(CheckoutSession {
            url: format!("https://checkout.stripe.com/c/pay/{}", id),
            id,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, PaymentError> {
        self.record_call(
            "create_portal_session",
            vec![customer_id.to_string(), return_url.to_string()],
        );
        self.check_error()?;

        let id = format!("bps_mock_{}", Self::short_id());
        Ok(PortalSession {
            url: format!("https://billing.stripe.com/p/session/{}", id),
            id,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        self.record_call(
            "verify_webhook",
            vec![
                String::from_utf8_lossy(payload).chars().take(50).collect(),
                signature.chars().take(20).collect(),
            ],
        );
        self.check_error()?;

        if signature.is_empty() {
            return Err(PaymentError::invalid_webhook("Missing Stripe-Signature header"));
        }

        let configured = {
            let state = self.state();
            if state.reject_webhooks {
                return Err(PaymentError::invalid_webhook("Verification disabled"));
            }
            state.next_webhook_event.clone()
        };

        match configured {
            Some(event) => Ok(event),
            None => Self::parse_payload(payload),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Test Helpers
// ════════════════════════════════════════════════════════════════════════════════

impl MockPaymentProvider {
    /// A `checkout.session.completed` event for the given user.
    pub fn checkout_completed_event(
        customer_id: &str,
        subscription_id: &str,
        user_id: &str,
    ) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_checkout_{}", Self::short_id()),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: format!("cs_{}", Self::short_id()),
                customer_id: Some(customer_id.to_string()),
                subscription_id: Some(subscription_id.to_string()),
                client_reference_id: Some(user_id.to_string()),
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// A `customer.subscription.updated` event.
    pub fn subscription_updated_event(
        customer_id: &str,
        subscription_id: &str,
        status: SubscriptionStatus,
    ) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_upd_{}", Self::short_id()),
            event_type: WebhookEventType::SubscriptionUpdated,
            data: WebhookEventData::Subscription {
                subscription_id: subscription_id.to_string(),
                customer_id: customer_id.to_string(),
                status,
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }

    /// A `customer.subscription.deleted` event.
    pub fn subscription_deleted_event(customer_id: &str, subscription_id: &str) -> WebhookEvent {
        WebhookEvent {
            id: format!("evt_del_{}", Self::short_id()),
            event_type: WebhookEventType::SubscriptionDeleted,
            data: WebhookEventData::Subscription {
                subscription_id: subscription_id.to_string(),
                customer_id: customer_id.to_string(),
                status: SubscriptionStatus::Canceled,
            },
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::PaymentErrorCode;

    fn checkout_request(email: &str) -> CreateCheckoutRequest {
        CreateCheckoutRequest {
            user_id: UserId::new(),
            email: email.to_string(),
            success_url: "https://cellar.test/?upgrade=success".to_string(),
            cancel_url: "https://cellar.test/?upgrade=cancel".to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Basic Operation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_checkout_session_returns_hosted_url() {
        let mock = MockPaymentProvider::new();

        let session = mock
            .create_checkout_session(checkout_request("a@example.com"))
            .await
            .unwrap();

        assert!(session.id.starts_with("cs_mock_"));
        assert!(session.url.ends_with(&session.id));
    }

    #[tokio::test]
    async fn create_portal_session_returns_url() {
        let mock = MockPaymentProvider::new();

        let session = mock
            .create_portal_session("cus_123", "https://cellar.test/settings")
            .await
            .unwrap();

        assert!(session.url.starts_with("https://billing.stripe.com/"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Error Injection Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn set_error_is_consumed_by_next_call() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::network("connection reset"));

        let first = mock.create_portal_session("cus_1", "/settings").await;
        assert_eq!(first.unwrap_err().code, PaymentErrorCode::NetworkError);

        let second = mock.create_portal_session("cus_1", "/settings").await;
        assert!(second.is_ok());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn call_log_contains_arguments() {
        let mock = MockPaymentProvider::new();

        mock.create_checkout_session(checkout_request("tracked@example.com"))
            .await
            .unwrap();

        assert!(mock.was_called("create_checkout_session"));
        assert!(!mock.was_called("create_portal_session"));
        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].args.contains(&"tracked@example.com".to_string()));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_webhook_returns_configured_event() {
        let mock = MockPaymentProvider::new();
        let event = MockPaymentProvider::checkout_completed_event("cus_123", "sub_456", "usr_789");
        mock.set_webhook_event(event.clone());

        let result = mock.verify_webhook(b"{}", "signature").await.unwrap();

        assert_eq!(result, event);
    }

    #[tokio::test]
    async fn verify_webhook_parses_subscription_payload() {
        let mock = MockPaymentProvider::new();
        let payload = r#"{
            "id": "evt_test",
            "type": "customer.subscription.updated",
            "created": 1704067200,
            "data": {"object": {"id": "sub_1", "customer": "cus_1", "status": "unpaid"}}
        }"#;

        let event = mock.verify_webhook(payload.as_bytes(), "sig").await.unwrap();

        assert_eq!(event.id, "evt_test");
        assert_eq!(
            event.data,
            WebhookEventData::Subscription {
                subscription_id: "sub_1".to_string(),
                customer_id: "cus_1".to_string(),
                status: SubscriptionStatus::Unpaid,
            }
        );
    }

    #[tokio::test]
    async fn verify_webhook_requires_signature_header() {
        let mock = MockPaymentProvider::new();
        let result = mock.verify_webhook(b"{}", "").await;
        assert_eq!(result.unwrap_err().code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn rejecting_webhooks_fails_verification() {
        let mock = MockPaymentProvider::rejecting_webhooks();

        let result = mock.verify_webhook(b"{}", "signature").await;

        assert!(result.unwrap_err().message.contains("disabled"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helper Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn subscription_deleted_event_is_canceled() {
        let event = MockPaymentProvider::subscription_deleted_event("cus_1", "sub_1");
        assert_eq!(event.event_type, WebhookEventType::SubscriptionDeleted);
        assert!(matches!(
            event.data,
            WebhookEventData::Subscription {
                status: SubscriptionStatus::Canceled,
                ..
            }
        ));
    }
}
