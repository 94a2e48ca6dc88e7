//! The session cookie on the wire.
//!
//! Tokens from `SignedCookieSessions` are base64url, so values never need
//! quoting or escaping.

use http::header::{InvalidHeaderValue, COOKIE};
use http::{HeaderMap, HeaderValue};

use crate::adapters::auth::SESSION_COOKIE_NAME;

/// `Set-Cookie` value that stores `token` for `max_age_secs`.
pub fn session_cookie(
    token: &str,
    max_age_secs: i64,
    secure: bool,
) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
        SESSION_COOKIE_NAME,
        token,
        max_age_secs,
        if secure { "; Secure" } else { "" }
    ))
}

/// `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    let value = if secure {
        "session-name=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax; Secure"
    } else {
        "session-name=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax"
    };
    HeaderValue::from_static(value)
}

/// First value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"'))
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_carries_lax_http_only_flags() {
        let value = session_cookie("abc.def", 604800, false).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("session-name=abc.def;"));
        assert!(value.contains("Max-Age=604800"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(!value.contains("Secure"));
    }

    #[test]
    fn production_cookie_is_secure() {
        let value = session_cookie("abc.def", 60, true).unwrap();
        assert!(value.to_str().unwrap().ends_with("; Secure"));
        assert!(clear_session_cookie(true).to_str().unwrap().contains("Max-Age=0"));
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("theme=dark; session-name=tok.sig"));
        headers.append(COOKIE, HeaderValue::from_static("other=1"));

        assert_eq!(read_cookie(&headers, "session-name"), Some("tok.sig"));
        assert_eq!(read_cookie(&headers, "theme"), Some("dark"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn cleared_cookie_reads_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session-name="));
        assert_eq!(read_cookie(&headers, "session-name"), None);
    }
}
