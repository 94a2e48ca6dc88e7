//! Form tokens against cross-site request forgery.
//!
//! Each browser holds a random nonce in the `csrf-nonce` cookie. The token
//! placed in forms is `base64url(hmac_sha256(nonce, session cookie))`, so
//! it only verifies next to the same nonce and the same session cookie.
//! Logging in or out therefore invalidates tokens rendered before.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::domain::foundation::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Name of the nonce cookie.
pub const CSRF_COOKIE_NAME: &str = "csrf-nonce";

/// Form field carrying the token.
pub const CSRF_FIELD_NAME: &str = "csrf_token";

/// Header alternative to the form field.
pub const CSRF_HEADER_NAME: &str = "x-csrf-token";

const NONCE_LEN: usize = 32;

pub struct CsrfTokens {
    secret: SecretString,
}

impl CsrfTokens {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// A fresh nonce: 128 random bits as lowercase hex.
    pub fn new_nonce() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    /// Whether a cookie value looks like a nonce we issued.
    pub fn is_valid_nonce(raw: &str) -> bool {
        raw.len() == NONCE_LEN && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }

    fn mac(&self, nonce: &str, session: &str) -> Result<HmacSha256, AuthError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::service_unavailable(format!("hmac: {}", e)))?;
        mac.update(b"csrf\0");
        mac.update(nonce.as_bytes());
        mac.update(b"\0");
        mac.update(session.as_bytes());
        Ok(mac)
    }

    /// The token forms must send back. `session` is the raw session cookie
    /// value, empty for visitors.
    pub fn token(&self, nonce: &str, session: &str) -> Result<String, AuthError> {
        let mac = self.mac(nonce, session)?;
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    /// Constant-time check of a submitted token.
    pub fn verify(&self, nonce: &str, session: &str, presented: &str) -> bool {
        let Ok(signature) = URL_SAFE_NO_PAD.decode(presented.trim()) else {
            return false;
        };
        match self.mac(nonce, session) {
            Ok(mac) => mac.verify_slice(&signature).is_ok(),
            Err(_) => false,
        }
    }
}
