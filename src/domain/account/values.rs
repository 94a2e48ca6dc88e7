//! Account value objects: email, currency, signup plan and credentials.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Minimum password length accepted at signup.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @"))?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "not an email address"));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "contains whitespace"));
        }
        Ok(Self(email))
    }

    /// Wraps a value already normalized by the database.
    pub fn from_trusted(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Three-letter display currency for prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let code = raw.trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected a three-letter code",
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Wraps a stored value, falling back to USD when the column is blank.
    pub fn from_stored(value: &str) -> Self {
        Self::parse(value).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self("USD".to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Plan picked on the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignupPlan {
    #[default]
    Free,
    Pro,
}

impl SignupPlan {
    /// Anything other than `pro` signs up for the free plan.
    pub fn from_form(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("pro") => SignupPlan::Pro,
            _ => SignupPlan::Free,
        }
    }
}

/// Validated signup credentials.
#[derive(Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

impl Credentials {
    pub fn for_signup(email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::invalid_format(
                "password",
                format!("must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn email_is_normalized() {
        let email = Email::parse("  Owner@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "owner@example.com");
    }

    #[test]
    fn email_requires_at_sign_with_both_parts() {
        assert!(Email::parse("").is_err());
        assert!(Email::parse("owner.example.com").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("owner@").is_err());
        assert!(Email::parse("a@b@c").is_err());
    }

    #[test]
    fn currency_is_uppercased() {
        assert_eq!(Currency::parse("eur").unwrap().as_str(), "EUR");
    }

    #[test]
    fn currency_rejects_bad_shapes() {
        assert!(Currency::parse("").is_err());
        assert!(Currency::parse("EURO").is_err());
        assert!(Currency::parse("U$D").is_err());
    }

    #[test]
    fn blank_stored_currency_defaults_to_usd() {
        assert_eq!(Currency::from_stored("").as_str(), "USD");
        assert_eq!(Currency::from_stored("gbp").as_str(), "GBP");
    }

    #[test]
    fn signup_plan_only_pro_is_pro() {
        assert_eq!(SignupPlan::from_form(Some("pro")), SignupPlan::Pro);
        assert_eq!(SignupPlan::from_form(Some("PRO ")), SignupPlan::Pro);
        assert_eq!(SignupPlan::from_form(Some("free")), SignupPlan::Free);
        assert_eq!(SignupPlan::from_form(None), SignupPlan::Free);
    }

    #[test]
    fn credentials_enforce_password_length() {
        assert!(Credentials::for_signup("a@b.com", "").is_err());
        assert!(Credentials::for_signup("a@b.com", "short").is_err());
        assert!(Credentials::for_signup("a@b.com", "long enough").is_ok());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let creds = Credentials::for_signup("a@b.com", "hunter2hunter2").unwrap();
        assert!(!format!("{:?}", creds).contains("hunter2"));
    }

    proptest! {
        #[test]
        fn parsed_emails_are_lowercase(local in "[A-Za-z0-9]{1,12}", domain in "[A-Za-z]{1,10}\\.[a-z]{2,3}") {
            let email = Email::parse(&format!("{}@{}", local, domain)).unwrap();
            prop_assert_eq!(email.as_str().to_string(), email.as_str().to_lowercase());
        }
    }
}
