//! CSRF protection for form posts.
//!
//! ```text
//! GET/HEAD  → csrf_middleware → sets the nonce cookie if missing
//!                             → puts CsrfToken into extensions for the views
//! POST etc. → csrf_middleware → token from x-csrf-token or the csrf_token field
//!                             → 403 unless it matches the nonce and session cookies
//! ```
//!
//! Form bodies are buffered to find the field and handed on unchanged, so
//! handlers keep using `Form` and `Multipart` as usual.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Multipart, Request, State},
    http::{
        header::{InvalidHeaderValue, CONTENT_TYPE, SET_COOKIE},
        request::Parts,
        HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use url::form_urlencoded;

use crate::adapters::auth::{
    CsrfTokens, CSRF_COOKIE_NAME, CSRF_FIELD_NAME, CSRF_HEADER_NAME, SESSION_COOKIE_NAME,
};
use crate::adapters::http::MAX_UPLOAD_BYTES;

use super::session_cookie::read_cookie;

/// State for [`csrf_middleware`].
#[derive(Clone)]
pub struct CsrfState {
    pub tokens: Arc<CsrfTokens>,
    /// Adds `Secure` to the nonce cookie.
    pub secure_cookies: bool,
}

/// The token to embed in forms rendered for this request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsrfToken(pub String);

/// Issues the nonce cookie and checks tokens on state-changing requests.
pub async fn csrf_middleware(
    State(csrf): State<CsrfState>,
    request: Request,
    next: Next,
) -> Response {
    let session = read_cookie(request.headers(), SESSION_COOKIE_NAME)
        .unwrap_or_default()
        .to_owned();
    let existing = read_cookie(request.headers(), CSRF_COOKIE_NAME)
        .filter(|nonce| CsrfTokens::is_valid_nonce(nonce))
        .map(str::to_owned);
    let issue_cookie = existing.is_none();
    let nonce = existing.unwrap_or_else(CsrfTokens::new_nonce);

    let mut request = if is_safe(request.method()) {
        request
    } else {
        let (request, presented) = match presented_token(request).await {
            Ok(found) => found,
            Err(response) => return response,
        };
        let valid = !issue_cookie
            && presented.is_some_and(|token| csrf.tokens.verify(&nonce, &session, &token));
        if !valid {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "Rejected request with missing or invalid CSRF token"
            );
            return CsrfRejection.into_response();
        }
        request
    };

    let token = match csrf.tokens.token(&nonce, &session) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "CSRF token unavailable");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    request.extensions_mut().insert(CsrfToken(token));

    let mut response = next.run(request).await;
    if issue_cookie {
        match nonce_cookie(&nonce, csrf.secure_cookies) {
            Ok(cookie) => {
                response.headers_mut().append(SET_COOKIE, cookie);
            }
            Err(e) => tracing::error!(error = %e, "Failed to build CSRF cookie"),
        }
    }
    response
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE)
}

/// `Set-Cookie` value for the nonce. Lives as long as the browser session.
pub fn nonce_cookie(nonce: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
        CSRF_COOKIE_NAME,
        nonce,
        if secure { "; Secure" } else { "" }
    ))
}

/// Finds the submitted token and returns the request with its body intact.
async fn presented_token(request: Request) -> Result<(Request, Option<String>), Response> {
    if let Some(token) = request
        .headers()
        .get(CSRF_HEADER_NAME)
        .and_then(|value| value.to_str().ok())
    {
        let token = token.to_owned();
        return Ok((request, Some(token)));
    }

    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let urlencoded = content_type.starts_with("application/x-www-form-urlencoded");
    let multipart = content_type.starts_with("multipart/form-data");
    if !urlencoded && !multipart {
        return Ok((request, None));
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, MAX_UPLOAD_BYTES)
        .await
        .map_err(|e| {
            tracing::debug!(error = %e, "Unreadable form body");
            (StatusCode::BAD_REQUEST, "Error parsing form").into_response()
        })?;

    let token = if urlencoded {
        form_urlencoded::parse(&bytes)
            .find(|(name, _)| name == CSRF_FIELD_NAME)
            .map(|(_, value)| value.into_owned())
    } else {
        multipart_token(&parts, bytes.clone()).await
    };

    Ok((Request::from_parts(parts, Body::from(bytes)), token))
}

/// Reads multipart fields up to the token field. Forms put it first.
async fn multipart_token(parts: &Parts, bytes: Bytes) -> Option<String> {
    let mut copy = Request::new(Body::from(bytes));
    *copy.headers_mut() = parts.headers.clone();
    *copy.extensions_mut() = parts.extensions.clone();

    let mut multipart = Multipart::from_request(copy, &()).await.ok()?;
    while let Some(field) = multipart.next_field().await.ok()? {
        if field.name() == Some(CSRF_FIELD_NAME) {
            return field.text().await.ok();
        }
    }
    None
}

impl<S> axum::extract::FromRequestParts<S> for CsrfToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            Ok(parts
                .extensions
                .get::<CsrfToken>()
                .cloned()
                .unwrap_or_default())
        })
    }
}

/// Missing or mismatched token.
#[derive(Debug, Clone, Copy)]
pub struct CsrfRejection;

impl IntoResponse for CsrfRejection {
    fn into_response(self) -> Response {
        (StatusCode::FORBIDDEN, "Invalid CSRF token").into_response()
    }
}
