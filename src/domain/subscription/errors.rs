//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | UserNotFound | 404 |
//! | NoBillingAccount | 400 |
//! | InvalidWebhook | 400 |
//! | PaymentProvider | 502 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Errors from checkout, billing portal and webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// The signed-in user has no record.
    UserNotFound(UserId),

    /// Portal requested before the user ever completed a checkout.
    NoBillingAccount,

    /// Signature, timestamp or payload of a webhook was rejected.
    InvalidWebhook(String),

    /// The payment provider returned an error or was unreachable.
    PaymentProvider { reason: String, retryable: bool },

    /// Infrastructure error.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn user_not_found(user_id: UserId) -> Self {
        SubscriptionError::UserNotFound(user_id)
    }

    pub fn invalid_webhook(reason: impl Into<String>) -> Self {
        SubscriptionError::InvalidWebhook(reason.into())
    }

    pub fn payment_provider(reason: impl Into<String>, retryable: bool) -> Self {
        SubscriptionError::PaymentProvider {
            reason: reason.into(),
            retryable,
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::UserNotFound(_) => ErrorCode::UserNotFound,
            SubscriptionError::NoBillingAccount => ErrorCode::NoBillingAccount,
            SubscriptionError::InvalidWebhook(_) => ErrorCode::InvalidWebhookSignature,
            SubscriptionError::PaymentProvider { .. } => ErrorCode::ExternalServiceError,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Message safe to show to the user.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::UserNotFound(_) => "User not found".to_string(),
            SubscriptionError::NoBillingAccount => "No billing account found".to_string(),
            SubscriptionError::InvalidWebhook(_) => "Invalid webhook signature".to_string(),
            SubscriptionError::PaymentProvider { .. } => {
                "Payment provider is unavailable, please try again".to_string()
            }
            SubscriptionError::Infrastructure(_) => "Internal server error".to_string(),
        }
    }

    /// True when Stripe should redeliver the event later.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubscriptionError::PaymentProvider { retryable, .. } => *retryable,
            SubscriptionError::Infrastructure(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionError::InvalidWebhook(reason) => {
                write!(f, "Invalid webhook: {}", reason)
            }
            SubscriptionError::PaymentProvider { reason, .. } => {
                write!(f, "Payment provider error: {}", reason)
            }
            SubscriptionError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        SubscriptionError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_billing_account_message_matches_ui_copy() {
        assert_eq!(SubscriptionError::NoBillingAccount.message(), "No billing account found");
    }

    #[test]
    fn invalid_webhook_is_not_retryable() {
        assert!(!SubscriptionError::invalid_webhook("bad sig").is_retryable());
    }

    #[test]
    fn infrastructure_errors_are_retryable() {
        assert!(SubscriptionError::infrastructure("db down").is_retryable());
        assert!(SubscriptionError::payment_provider("timeout", true).is_retryable());
        assert!(!SubscriptionError::payment_provider("bad request", false).is_retryable());
    }

    #[test]
    fn domain_errors_become_infrastructure() {
        let err: SubscriptionError =
            DomainError::new(ErrorCode::DatabaseError, "connection reset").into();
        assert!(matches!(err, SubscriptionError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
