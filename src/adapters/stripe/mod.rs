//! Stripe payment provider adapter.
//!
//! Implements the `PaymentProvider` port for Stripe:
//! - Hosted checkout for the Pro plan
//! - Billing portal sessions
//! - Webhook signature verification
//!
//! # Security
//!
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks (5-minute window)
//! - All secrets are handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! Built from [`crate::config::PaymentConfig`]:
//! - `WINE_CELLAR__PAYMENT__STRIPE_SECRET_KEY`
//! - `WINE_CELLAR__PAYMENT__STRIPE_WEBHOOK_SECRET`
//! - `WINE_CELLAR__PAYMENT__STRIPE_PRICE_ID`

mod mock_payment_provider;
mod stripe_adapter;
mod webhook_types;

pub use mock_payment_provider::{MethodCall, MockPaymentProvider};
pub use stripe_adapter::{StripeConfig, StripePaymentAdapter};
pub use webhook_types::{
    SignatureHeader, SignatureParseError, StripeCheckoutSession, StripeSubscription,
    StripeWebhookEvent,
};
