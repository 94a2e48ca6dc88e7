//! Form and query payloads for account pages.

use serde::Deserialize;

use crate::adapters::http::views::CheckoutOutcome;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    /// `pro` heads to checkout right after signup.
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogInForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignUpPageQuery {
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub currency: String,
    pub debug_tier: Option<String>,
}

/// Stripe sends users back to `/settings?success=true` or `?canceled=true`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPageQuery {
    pub success: Option<String>,
    pub canceled: Option<String>,
}

impl SettingsPageQuery {
    pub fn outcome(&self) -> Option<CheckoutOutcome> {
        let flag = |value: &Option<String>| value.as_deref() == Some("true");
        if flag(&self.success) {
            Some(CheckoutOutcome::Succeeded)
        } else if flag(&self.canceled) {
            Some(CheckoutOutcome::Canceled)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_outcome_from_query() {
        let query = SettingsPageQuery {
            success: Some("true".into()),
            canceled: None,
        };
        assert_eq!(query.outcome(), Some(CheckoutOutcome::Succeeded));

        let query = SettingsPageQuery {
            success: None,
            canceled: Some("true".into()),
        };
        assert_eq!(query.outcome(), Some(CheckoutOutcome::Canceled));

        assert_eq!(SettingsPageQuery::default().outcome(), None);
    }
}
