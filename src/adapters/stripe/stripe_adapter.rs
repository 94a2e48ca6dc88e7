//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the Stripe REST API:
//! hosted checkout for the Pro plan, the billing portal, and webhook
//! verification.
//!
//! # Security
//!
//! - HMAC-SHA256 signature verification with constant-time comparison
//! - Timestamp validation (5-minute window) for replay attack prevention
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(api_key, webhook_secret, price_id);
//! let adapter = StripePaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::PaymentConfig;
use crate::domain::subscription::SubscriptionStatus;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    PortalSession, WebhookEvent, WebhookEventData, WebhookEventType,
};

use super::webhook_types::{
    SignatureHeader, StripeCheckoutSession, StripeErrorEnvelope, StripePortalSession,
    StripeSubscription, StripeWebhookEvent,
};

type HmacSha256 = Hmac<Sha256>;

/// Maximum age for webhook events (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

const STRIPE_API_BASE_URL: &str = "https://api.stripe.com";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    api_key: SecretString,

    /// Webhook signing secret (whsec_...).
    webhook_secret: SecretString,

    /// Recurring price of the Pro plan (price_...).
    price_id: String,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Whether to require livemode events in production.
    require_livemode: bool,
}

impl StripeConfig {
    pub fn new(
        api_key: impl Into<String>,
        webhook_secret: impl Into<String>,
        price_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            webhook_secret: SecretString::new(webhook_secret.into()),
            price_id: price_id.into(),
            api_base_url: STRIPE_API_BASE_URL.to_string(),
            require_livemode: false,
        }
    }

    /// Builds the adapter config from application config.
    ///
    /// Returns `None` when billing is not configured; the caller then runs
    /// without a payment provider.
    pub fn from_payment_config(config: &PaymentConfig) -> Option<Self> {
        let api_key = config.stripe_secret_key.as_ref()?;
        let webhook_secret = config.stripe_webhook_secret.as_ref()?;
        if config.stripe_price_id.is_empty() {
            return None;
        }

        Some(Self {
            api_key: api_key.clone(),
            webhook_secret: webhook_secret.clone(),
            price_id: config.stripe_price_id.clone(),
            api_base_url: STRIPE_API_BASE_URL.to_string(),
            require_livemode: config.is_live_mode(),
        })
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Require livemode events.
    pub fn with_require_livemode(mut self, require: bool) -> Self {
        self.require_livemode = require;
        self
    }
}

/// Stripe payment provider adapter.
pub struct StripePaymentAdapter {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentAdapter {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Verify webhook signature using HMAC-SHA256.
    ///
    /// # Security
    ///
    /// - Uses constant-time comparison to prevent timing attacks
    /// - Validates timestamp to prevent replay attacks
    fn verify_signature(&self, payload: &[u8], header: &SignatureHeader) -> Result<(), PaymentError> {
        // 1. Validate timestamp (prevent replay attacks)
        let now = chrono::Utc::now().timestamp();
        let age = now.checked_sub(header.timestamp).ok_or_else(|| {
            tracing::warn!(
                event_timestamp = header.timestamp,
                "Webhook timestamp out of range"
            );
            PaymentError::invalid_webhook("Invalid timestamp")
        })?;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                age_secs = age,
                "Webhook event too old - possible replay attack"
            );
            return Err(PaymentError::invalid_webhook(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                current_time = now,
                "Webhook event from future - clock skew or manipulation"
            );
            return Err(PaymentError::invalid_webhook("Event timestamp in future"));
        }

        // 2. Compute expected signature over "{t}.{payload}"
        let mut mac =
            HmacSha256::new_from_slice(self.config.webhook_secret.expose_secret().as_bytes())
                .map_err(|e| PaymentError::invalid_webhook(format!("Invalid signing key: {}", e)))?;
        mac.update(header.timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        let expected = mac.finalize().into_bytes();

        // 3. Constant-time comparison against every v1 signature
        let expected_bytes: &[u8] = expected.as_slice();
        let matched = header
            .v1_signatures
            .iter()
            .any(|provided| expected_bytes.ct_eq(provided.as_slice()).into());

        if !matched {
            tracing::warn!(
                provided_signatures = header.v1_signatures.len(),
                "Invalid webhook signature"
            );
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        Ok(())
    }

    /// Parse a Stripe event and convert to port types.
    fn parse_event(&self, payload: &[u8]) -> Result<WebhookEvent, PaymentError> {
        let stripe_event: StripeWebhookEvent = serde_json::from_slice(payload).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse webhook payload");
            PaymentError::invalid_webhook(format!("Invalid JSON: {}", e))
        })?;

        if self.config.require_livemode && !stripe_event.livemode {
            tracing::warn!(
                event_id = %stripe_event.id,
                "Rejected test mode event in live mode"
            );
            return Err(PaymentError::invalid_webhook(
                "Test mode events not allowed in live mode",
            ));
        }

        let event_type = WebhookEventType::from_stripe(&stripe_event.event_type);
        let data = Self::extract_event_data(&event_type, &stripe_event)?;

        Ok(WebhookEvent {
            id: stripe_event.id,
            event_type,
            data,
            created_at: stripe_event.created,
        })
    }

    fn extract_event_data(
        event_type: &WebhookEventType,
        event: &StripeWebhookEvent,
    ) -> Result<WebhookEventData, PaymentError> {
        match event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                let session: StripeCheckoutSession =
                    serde_json::from_value(event.data.object.clone()).map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid checkout session: {}", e))
                    })?;

                Ok(WebhookEventData::Checkout {
                    session_id: session.id,
                    customer_id: session.customer,
                    subscription_id: session.subscription,
                    client_reference_id: session.client_reference_id,
                })
            }

            WebhookEventType::SubscriptionUpdated | WebhookEventType::SubscriptionDeleted => {
                let sub: StripeSubscription = serde_json::from_value(event.data.object.clone())
                    .map_err(|e| {
                        PaymentError::invalid_webhook(format!("Invalid subscription: {}", e))
                    })?;

                Ok(WebhookEventData::Subscription {
                    subscription_id: sub.id,
                    customer_id: sub.customer,
                    status: SubscriptionStatus::parse(&sub.status),
                })
            }

            WebhookEventType::Unknown(_) => Ok(WebhookEventData::Raw {
                json: event.data.object.to_string(),
            }),
        }
    }

    /// POSTs a form to the Stripe API and decodes the JSON response.
    async fn post_form<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PaymentError> {
        let url = format!("{}{}", self.config.api_base_url, path);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.api_key.expose_secret(), Option::<&str>::None)
            .form(params)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::api_error(status, &body));
        }

        response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Stripe response: {}", e),
            )
        })
    }

    fn api_error(status: reqwest::StatusCode, body: &str) -> PaymentError {
        let code = match status.as_u16() {
            401 | 403 => PaymentErrorCode::AuthenticationError,
            404 => PaymentErrorCode::NotFound,
            429 => PaymentErrorCode::RateLimitExceeded,
            _ => PaymentErrorCode::ProviderError,
        };

        match serde_json::from_str::<StripeErrorEnvelope>(body) {
            Ok(envelope) => {
                let message = envelope
                    .error
                    .message
                    .unwrap_or_else(|| format!("Stripe API error ({})", status));
                let error = PaymentError::new(code, message);
                match envelope.error.code.or(envelope.error.error_type) {
                    Some(provider_code) => error.with_provider_code(provider_code),
                    None => error,
                }
            }
            Err(_) => PaymentError::new(code, format!("Stripe API error ({}): {}", status, body)),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripePaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let params = [
            ("mode", "subscription".to_string()),
            ("customer_email", request.email),
            ("client_reference_id", request.user_id.to_string()),
            ("line_items[0][price]", self.config.price_id.clone()),
            ("line_items[0][quantity]", "1".to_string()),
            ("success_url", request.success_url),
            ("cancel_url", request.cancel_url),
        ];

        let session: StripeCheckoutSession =
            self.post_form("/v1/checkout/sessions", &params).await?;

        let url = session.url.ok_or_else(|| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                "Checkout session has no URL",
            )
        })?;

        tracing::info!(
            session_id = %session.id,
            user_id = %request.user_id,
            "Created Stripe checkout session"
        );

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<PortalSession, PaymentError> {
        let params = [
            ("customer", customer_id.to_string()),
            ("return_url", return_url.to_string()),
        ];

        let portal: StripePortalSession =
            self.post_form("/v1/billing_portal/sessions", &params).await?;

        Ok(PortalSession {
            id: portal.id,
            url: portal.url,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        // 1. Parse signature header
        let header = SignatureHeader::parse(signature).map_err(|e| {
            tracing::warn!(error = %e, "Failed to parse Stripe-Signature header");
            PaymentError::invalid_webhook(e.to_string())
        })?;

        // 2. Verify signature (includes timestamp validation)
        self.verify_signature(payload, &header)?;

        // 3. Parse and convert event
        let webhook_event = self.parse_event(payload)?;

        tracing::info!(
            event_id = %webhook_event.id,
            event_type = ?webhook_event.event_type,
            "Webhook signature verified"
        );

        Ok(webhook_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::webhook_types::hex_encode;

    fn test_config() -> StripeConfig {
        StripeConfig::new("sk_test_key", "whsec_test_secret", "price_pro")
    }

    fn create_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
        let signed_payload = format!("{}.{}", timestamp, payload);
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed_payload.as_bytes());
        let result = mac.finalize().into_bytes();
        format!("t={},v1={}", timestamp, hex_encode(&result))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_new_sets_defaults() {
        let config = test_config();
        assert_eq!(config.api_base_url, "https://api.stripe.com");
        assert_eq!(config.price_id, "price_pro");
        assert!(!config.require_livemode);
    }

    #[test]
    fn config_with_base_url() {
        let config = test_config().with_base_url("http://localhost:12111");
        assert_eq!(config.api_base_url, "http://localhost:12111");
    }

    #[test]
    fn config_from_payment_config_requires_all_keys() {
        let mut payment = PaymentConfig::default();
        assert!(StripeConfig::from_payment_config(&payment).is_none());

        payment.stripe_secret_key = Some(SecretString::new("sk_live_abc".to_string()));
        payment.stripe_webhook_secret = Some(SecretString::new("whsec_abc".to_string()));
        assert!(StripeConfig::from_payment_config(&payment).is_none());

        payment.stripe_price_id = "price_pro".to_string();
        let config = StripeConfig::from_payment_config(&payment).unwrap();
        assert_eq!(config.price_id, "price_pro");
        assert!(config.require_livemode);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Signature Verification Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn verify_signature_valid() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        assert!(adapter.verify_signature(payload.as_bytes(), &header).is_ok());
    }

    #[test]
    fn verify_signature_accepts_any_matching_v1() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp();
        let good = create_test_signature("whsec_test_secret", timestamp, payload);
        let good_hex = good.split("v1=").nth(1).unwrap();
        let header_value = format!("t={},v1={},v1={}", timestamp, "00".repeat(32), good_hex);

        let header = SignatureHeader::parse(&header_value).unwrap();
        assert!(adapter.verify_signature(payload.as_bytes(), &header).is_ok());
    }

    #[test]
    fn verify_signature_invalid() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let timestamp = chrono::Utc::now().timestamp();

        // Create signature with wrong secret
        let signature = create_test_signature("wrong_secret", timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        let result = adapter.verify_signature(payload.as_bytes(), &header);

        assert!(matches!(
            result.unwrap_err().code,
            PaymentErrorCode::InvalidWebhook
        ));
    }

    #[test]
    fn verify_signature_rejects_tampered_payload() {
        let adapter = StripePaymentAdapter::new(test_config());
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, r#"{"id":"evt_a"}"#);

        let header = SignatureHeader::parse(&signature).unwrap();
        assert!(adapter
            .verify_signature(br#"{"id":"evt_b"}"#, &header)
            .is_err());
    }

    #[test]
    fn verify_signature_expired_timestamp() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let old_timestamp = chrono::Utc::now().timestamp() - 600; // 10 minutes ago

        let signature = create_test_signature("whsec_test_secret", old_timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        let err = adapter
            .verify_signature(payload.as_bytes(), &header)
            .unwrap_err();

        assert!(err.message.contains("too old"));
    }

    #[test]
    fn verify_signature_future_timestamp() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let future_timestamp = chrono::Utc::now().timestamp() + 120; // 2 minutes in future

        let signature = create_test_signature("whsec_test_secret", future_timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        let err = adapter
            .verify_signature(payload.as_bytes(), &header)
            .unwrap_err();

        assert!(err.message.contains("future"));
    }

    #[test]
    fn verify_signature_small_future_tolerance() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        // 30 seconds in future should be tolerated
        let timestamp = chrono::Utc::now().timestamp() + 30;

        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let header = SignatureHeader::parse(&signature).unwrap();
        assert!(adapter.verify_signature(payload.as_bytes(), &header).is_ok());
    }

    #[test]
    fn verify_signature_rejects_timestamp_at_range_limits() {
        let adapter = StripePaymentAdapter::new(test_config());

        for raw in ["t=-9223372036854775808,v1=00", "t=9223372036854775807,v1=00"] {
            let header = SignatureHeader::parse(raw).unwrap();
            let err = adapter.verify_signature(b"{}", &header).unwrap_err();
            assert_eq!(err.code, PaymentErrorCode::InvalidWebhook);
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Event Parsing Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn parse_checkout_session_completed() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{
            "id": "evt_test",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {
                "object": {
                    "id": "cs_test",
                    "object": "checkout.session",
                    "customer": "cus_test",
                    "subscription": "sub_test",
                    "client_reference_id": "usr_123",
                    "payment_status": "paid",
                    "status": "complete",
                    "mode": "subscription"
                }
            },
            "livemode": false,
            "pending_webhooks": 0
        }"#;

        let event = adapter.parse_event(payload.as_bytes()).unwrap();

        assert_eq!(event.id, "evt_test");
        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
        match event.data {
            WebhookEventData::Checkout {
                customer_id,
                subscription_id,
                client_reference_id,
                ..
            } => {
                assert_eq!(customer_id.as_deref(), Some("cus_test"));
                assert_eq!(subscription_id.as_deref(), Some("sub_test"));
                assert_eq!(client_reference_id.as_deref(), Some("usr_123"));
            }
            other => panic!("Expected Checkout data, got {:?}", other),
        }
    }

    #[test]
    fn parse_subscription_updated() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{
            "id": "evt_sub",
            "type": "customer.subscription.updated",
            "created": 1704067200,
            "data": {
                "object": {
                    "id": "sub_test",
                    "object": "subscription",
                    "customer": "cus_test",
                    "status": "past_due",
                    "current_period_end": 1706745600
                }
            },
            "livemode": false
        }"#;

        let event = adapter.parse_event(payload.as_bytes()).unwrap();

        assert_eq!(event.event_type, WebhookEventType::SubscriptionUpdated);
        assert_eq!(
            event.data,
            WebhookEventData::Subscription {
                subscription_id: "sub_test".to_string(),
                customer_id: "cus_test".to_string(),
                status: SubscriptionStatus::PastDue,
            }
        );
    }

    #[test]
    fn parse_subscription_deleted() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{
            "id": "evt_del",
            "type": "customer.subscription.deleted",
            "created": 1704067200,
            "data": {"object": {"id": "sub_test", "customer": "cus_test", "status": "canceled"}},
            "livemode": false
        }"#;

        let event = adapter.parse_event(payload.as_bytes()).unwrap();

        assert_eq!(event.event_type, WebhookEventType::SubscriptionDeleted);
        assert!(matches!(
            event.data,
            WebhookEventData::Subscription {
                status: SubscriptionStatus::Canceled,
                ..
            }
        ));
    }

    #[test]
    fn parse_unknown_event_type() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{
            "id": "evt_unknown",
            "type": "invoice.finalized",
            "created": 1704067200,
            "data": {"object": {"id": "in_1"}},
            "livemode": false
        }"#;

        let event = adapter.parse_event(payload.as_bytes()).unwrap();

        assert_eq!(
            event.event_type,
            WebhookEventType::Unknown("invoice.finalized".to_string())
        );
        assert!(matches!(event.data, WebhookEventData::Raw { .. }));
    }

    #[test]
    fn parse_rejects_test_mode_in_live_mode() {
        let adapter = StripePaymentAdapter::new(test_config().with_require_livemode(true));
        let payload = r#"{
            "id": "evt_test",
            "type": "invoice.finalized",
            "created": 1704067200,
            "data": {"object": {}},
            "livemode": false
        }"#;

        let err = adapter.parse_event(payload.as_bytes()).unwrap_err();
        assert!(err.message.contains("Test mode"));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // API Error Mapping Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn api_error_reads_stripe_envelope() {
        let body = r#"{"error": {"type": "invalid_request_error", "code": "resource_missing", "message": "No such customer: 'cus_x'"}}"#;
        let err = StripePaymentAdapter::api_error(reqwest::StatusCode::NOT_FOUND, body);

        assert_eq!(err.code, PaymentErrorCode::NotFound);
        assert_eq!(err.provider_code.as_deref(), Some("resource_missing"));
        assert!(err.message.contains("cus_x"));
    }

    #[test]
    fn api_error_rate_limit_is_retryable() {
        let err = StripePaymentAdapter::api_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert_eq!(err.code, PaymentErrorCode::RateLimitExceeded);
        assert!(err.retryable);
    }

    #[test]
    fn api_error_auth_failure() {
        let err = StripePaymentAdapter::api_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.code, PaymentErrorCode::AuthenticationError);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Integration Tests (verify_webhook full flow)
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_webhook_valid_signature_and_payload() {
        let adapter = StripePaymentAdapter::new(test_config());

        let payload = r#"{
            "id": "evt_test123",
            "type": "checkout.session.completed",
            "created": 1704067200,
            "data": {
                "object": {
                    "id": "cs_test",
                    "object": "checkout.session",
                    "customer": "cus_test",
                    "payment_status": "paid",
                    "status": "complete",
                    "mode": "subscription"
                }
            },
            "livemode": false
        }"#;

        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let event = adapter
            .verify_webhook(payload.as_bytes(), &signature)
            .await
            .unwrap();

        assert_eq!(event.id, "evt_test123");
        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionCompleted);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_invalid_signature() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;
        let signature = "t=1704067200,v1=invalid_signature_hex";

        let result = adapter.verify_webhook(payload.as_bytes(), signature).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn verify_webhook_rejects_minimum_timestamp() {
        let adapter = StripePaymentAdapter::new(test_config());

        let result = adapter
            .verify_webhook(b"{}", "t=-9223372036854775808,v1=00")
            .await;

        assert_eq!(result.unwrap_err().code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_malformed_header() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = r#"{"id":"evt_test"}"#;

        let result = adapter
            .verify_webhook(payload.as_bytes(), "malformed_header")
            .await;

        assert_eq!(result.unwrap_err().code, PaymentErrorCode::InvalidWebhook);
    }

    #[tokio::test]
    async fn verify_webhook_rejects_invalid_json() {
        let adapter = StripePaymentAdapter::new(test_config());
        let payload = "not valid json";
        let timestamp = chrono::Utc::now().timestamp();
        let signature = create_test_signature("whsec_test_secret", timestamp, payload);

        let result = adapter.verify_webhook(payload.as_bytes(), &signature).await;

        assert!(result.unwrap_err().message.contains("Invalid JSON"));
    }
}
