//! Subscription handlers.
//!
//! ## Commands
//! - Starting a Stripe checkout for the Pro plan
//! - Opening the Stripe billing portal
//! - Applying verified payment webhooks to the user record

mod handle_payment_webhook;
mod open_billing_portal;
mod start_checkout;

use crate::domain::subscription::SubscriptionError;
use crate::ports::PaymentError;

pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
pub use open_billing_portal::{
    OpenBillingPortalCommand, OpenBillingPortalHandler, OpenBillingPortalResult,
};
pub use start_checkout::{StartCheckoutCommand, StartCheckoutHandler, StartCheckoutResult};

fn provider_error(err: PaymentError) -> SubscriptionError {
    tracing::error!(code = ?err.code, provider_code = ?err.provider_code, "{}", err.message);
    SubscriptionError::payment_provider(err.message, err.retryable)
}
