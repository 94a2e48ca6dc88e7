//! Stateless cookie sessions.
//!
//! The cookie value is `base64url(claims).base64url(hmac_sha256(claims))`.
//! Nothing is stored server-side; logging out clears the cookie.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionManager;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session-name";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: UserId,
    email: String,
    exp: i64,
}

pub struct SignedCookieSessions {
    secret: SecretString,
    max_age_secs: i64,
}

impl SignedCookieSessions {
    pub fn new(secret: SecretString, max_age_secs: i64) -> Self {
        Self {
            secret,
            max_age_secs,
        }
    }

    fn mac(&self) -> Result<HmacSha256, AuthError> {
        HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::service_unavailable(format!("hmac: {}", e)))
    }

    fn issue_at(&self, user: &AuthenticatedUser, now: i64) -> Result<String, AuthError> {
        let claims = SessionClaims {
            sub: user.id,
            email: user.email.clone(),
            exp: now + self.max_age_secs,
        };
        let json = serde_json::to_vec(&claims)
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        let payload = URL_SAFE_NO_PAD.encode(json);

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", payload, signature))
    }

    fn validate_at(&self, token: &str, now: i64) -> Result<AuthenticatedUser, AuthError> {
        let (payload, signature) = token.split_once('.').ok_or(AuthError::InvalidToken)?;
        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| AuthError::InvalidToken)?;

        let mut mac = self.mac()?;
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::InvalidToken)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidToken)?;
        let claims: SessionClaims =
            serde_json::from_slice(&json).map_err(|_| AuthError::InvalidToken)?;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(AuthenticatedUser::new(claims.sub, claims.email))
    }
}

impl SessionManager for SignedCookieSessions {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        self.issue_at(user, chrono::Utc::now().timestamp())
    }

    fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.validate_at(token, chrono::Utc::now().timestamp())
    }

    fn max_age_secs(&self) -> i64 {
        self.max_age_secs
    }
}
