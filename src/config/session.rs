//! Session and password configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Secret used when none is configured. Refused in production.
pub const DEVELOPMENT_SESSION_SECRET: &str = "super-secret-key";

const SEVEN_DAYS_SECS: i64 = 7 * 24 * 60 * 60;

/// Cookie session configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Key for signing session cookies
    pub secret: Option<SecretString>,

    #[serde(default = "default_max_age")]
    pub max_age_secs: i64,

    /// bcrypt work factor for new password hashes
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: None,
            max_age_secs: default_max_age(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_max_age() -> i64 {
    SEVEN_DAYS_SECS
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl SessionConfig {
    /// Configured secret, or the development default.
    pub fn signing_secret(&self) -> SecretString {
        self.secret
            .clone()
            .unwrap_or_else(|| SecretString::new(DEVELOPMENT_SESSION_SECRET.to_string()))
    }

    pub fn validate(&self, environment: Environment) -> Result<(), ValidationError> {
        if self.max_age_secs <= 0 {
            return Err(ValidationError::InvalidSessionMaxAge);
        }
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(ValidationError::InvalidBcryptCost);
        }
        if environment == Environment::Production {
            let secret = self
                .secret
                .as_ref()
                .ok_or(ValidationError::MissingRequired("SESSION_SECRET"))?;
            let secret = secret.expose_secret();
            if secret == DEVELOPMENT_SESSION_SECRET {
                return Err(ValidationError::DefaultSessionSecret);
            }
            if secret.len() < 16 {
                return Err(ValidationError::SessionSecretTooShort);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_seven_days_and_cost_ten() {
        let config = SessionConfig::default();
        assert_eq!(config.max_age_secs, 604_800);
        assert_eq!(config.bcrypt_cost, 10);
        assert_eq!(config.signing_secret().expose_secret(), DEVELOPMENT_SESSION_SECRET);
    }

    #[test]
    fn development_allows_missing_secret() {
        assert!(SessionConfig::default().validate(Environment::Development).is_ok());
    }

    #[test]
    fn production_requires_real_secret() {
        let config = SessionConfig::default();
        assert_eq!(
            config.validate(Environment::Production),
            Err(ValidationError::MissingRequired("SESSION_SECRET"))
        );

        let config = SessionConfig {
            secret: Some(SecretString::new(DEVELOPMENT_SESSION_SECRET.to_string())),
            ..Default::default()
        };
        assert_eq!(
            config.validate(Environment::Production),
            Err(ValidationError::DefaultSessionSecret)
        );

        let config = SessionConfig {
            secret: Some(SecretString::new("short".to_string())),
            ..Default::default()
        };
        assert_eq!(
            config.validate(Environment::Production),
            Err(ValidationError::SessionSecretTooShort)
        );

        let config = SessionConfig {
            secret: Some(SecretString::new("a-long-random-production-secret".to_string())),
            ..Default::default()
        };
        assert!(config.validate(Environment::Production).is_ok());
    }

    #[test]
    fn bcrypt_cost_bounds() {
        let config = SessionConfig {
            bcrypt_cost: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate(Environment::Development),
            Err(ValidationError::InvalidBcryptCost)
        );
    }
}
