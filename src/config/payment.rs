//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment configuration (Stripe)
///
/// Billing is optional outside production: with no secret key the
/// checkout and portal routes answer with a server error.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Stripe secret API key
    pub stripe_secret_key: Option<SecretString>,

    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Option<SecretString>,

    /// Price of the Pro subscription
    #[serde(default)]
    pub stripe_price_id: String,

    /// Public host used to build redirect URLs, with or without scheme
    #[serde(default = "default_domain")]
    pub domain: String,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            stripe_secret_key: None,
            stripe_webhook_secret: None,
            stripe_price_id: String::new(),
            domain: default_domain(),
        }
    }
}

fn default_domain() -> String {
    "localhost:8080".to_string()
}

impl PaymentConfig {
    pub fn is_configured(&self) -> bool {
        self.stripe_secret_key.is_some() && self.stripe_webhook_secret.is_some()
    }

    pub fn is_live_mode(&self) -> bool {
        self.stripe_secret_key
            .as_ref()
            .map(|k| k.expose_secret().starts_with("sk_live_"))
            .unwrap_or(false)
    }

    /// `domain` with an `https://` scheme added when it has none.
    pub fn base_url(&self) -> String {
        let domain = self.domain.trim().trim_end_matches('/');
        if domain.starts_with("http") {
            domain.to_string()
        } else {
            format!("https://{}", domain)
        }
    }

    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if environment == Environment::Production {
            if self.stripe_secret_key.is_none() {
                return Err(ValidationError::MissingRequired("STRIPE_SECRET_KEY"));
            }
            if self.stripe_webhook_secret.is_none() {
                return Err(ValidationError::MissingRequired("STRIPE_WEBHOOK_SECRET"));
            }
            if self.stripe_price_id.is_empty() {
                return Err(ValidationError::MissingRequired("STRIPE_PRICE_ID"));
            }
        }

        if let Some(key) = &self.stripe_secret_key {
            if !key.expose_secret().starts_with("sk_") {
                return Err(ValidationError::InvalidStripeKey);
            }
        }
        if let Some(secret) = &self.stripe_webhook_secret {
            if !secret.expose_secret().starts_with("whsec_") {
                return Err(ValidationError::InvalidStripeWebhookSecret);
            }
        }
        Ok(())
    }
}
