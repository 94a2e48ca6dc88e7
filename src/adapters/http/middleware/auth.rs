//! Session middleware and extractors for axum.
//!
//! This module provides:
//! - `session_middleware` - Reads the session cookie and injects the user into extensions
//! - `require_session` - Redirects anonymous requests to `/login` and disables caching
//! - `RequireAuth` - Extractor that requires a signed-in user
//! - `OptionalAuth` - Extractor for pages that render for everyone
//!
//! # Architecture
//!
//! The middleware only depends on the `SessionManager` port, so tests can
//! sign their own cookies with any secret.
//!
//! ```text
//! Request → session_middleware → injects AuthenticatedUser into extensions
//!                    ↓
//!           require_session (protected routes only)
//!                    ↓
//!           Handler → RequireAuth extractor reads from extensions
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
        HeaderValue,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::adapters::auth::SESSION_COOKIE_NAME;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionManager;

use super::session_cookie::read_cookie;

/// Session middleware state - wraps the session manager.
pub type AuthState = Arc<dyn SessionManager>;

/// Validates the session cookie, if any.
///
/// A valid cookie puts an `AuthenticatedUser` into the request extensions.
/// Missing, tampered and expired cookies all leave the request anonymous;
/// routes that need a user are guarded by [`require_session`].
pub async fn session_middleware(
    State(sessions): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = read_cookie(request.headers(), SESSION_COOKIE_NAME).map(str::to_owned);

    if let Some(token) = token {
        match sessions.validate(&token) {
            Ok(user) => {
                request.extensions_mut().insert(user);
            }
            Err(AuthError::ServiceUnavailable(msg)) => {
                tracing::error!("Session validation unavailable: {}", msg);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring session cookie");
            }
        }
    }

    next.run(request).await
}

/// Guards protected routes.
///
/// Anonymous requests are redirected to `/login`. Responses to signed-in
/// users are marked uncacheable.
pub async fn require_session(request: Request, next: Next) -> Response {
    if request.extensions().get::<AuthenticatedUser>().is_none() {
        return AuthRejection::Unauthenticated.into_response();
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(EXPIRES, HeaderValue::from_static("0"));
    response
}

/// Extractor that requires a signed-in user.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
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
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Extractor for optional authentication.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedUser>);

impl<S> axum::extract::FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
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
            let user = parts.extensions.get::<AuthenticatedUser>().cloned();
            Ok(OptionalAuth(user))
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid session cookie was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => Redirect::to("/login").into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::SignedCookieSessions;
    use crate::domain::foundation::UserId;
    use axum::body::Body;
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use secrecy::SecretString;
    use tower::ServiceExt;

    fn sessions() -> AuthState {
        Arc::new(SignedCookieSessions::new(
            SecretString::new("middleware-test-secret".to_string()),
            3600,
        ))
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "test@example.com")
    }

    fn app(sessions: AuthState) -> Router {
        let protected = Router::new()
            .route(
                "/private",
                get(|RequireAuth(user): RequireAuth| async move { user.email }),
            )
            .route_layer(axum::middleware::from_fn(require_session));

        Router::new()
            .route(
                "/public",
                get(|OptionalAuth(user): OptionalAuth| async move {
                    user.map(|u| u.email).unwrap_or_else(|| "guest".to_string())
                }),
            )
            .merge(protected)
            .layer(axum::middleware::from_fn_with_state(
                sessions,
                session_middleware,
            ))
    }

    fn request(uri: &str, cookie: Option<String>) -> axum::http::Request<Body> {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Protected routes
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn anonymous_request_redirects_to_login() {
        let response = app(sessions())
            .oneshot(request("/private", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn valid_cookie_reaches_handler_without_caching() {
        let sessions = sessions();
        let token = sessions.issue(&test_user()).unwrap();

        let response = app(sessions)
            .oneshot(request("/private", Some(format!("session-name={}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "no-cache, no-store, must-revalidate"
        );
        assert_eq!(response.headers()[header::PRAGMA], "no-cache");
        assert_eq!(response.headers()[header::EXPIRES], "0");
        assert_eq!(body_text(response).await, "test@example.com");
    }

    #[tokio::test]
    async fn cookie_signed_with_other_secret_is_ignored() {
        let forged = SignedCookieSessions::new(SecretString::new("attacker".to_string()), 3600)
            .issue(&test_user())
            .unwrap();

        let response = app(sessions())
            .oneshot(request("/private", Some(format!("session-name={}", forged))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Optional auth
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn public_route_sees_guest_without_cookie() {
        let response = app(sessions())
            .oneshot(request("/public", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CACHE_CONTROL).is_none());
        assert_eq!(body_text(response).await, "guest");
    }

    #[tokio::test]
    async fn public_route_sees_signed_in_user() {
        let sessions = sessions();
        let token = sessions.issue(&test_user()).unwrap();

        let response = app(sessions)
            .oneshot(request("/public", Some(format!("theme=dark; session-name={}", token))))
            .await
            .unwrap();

        assert_eq!(body_text(response).await, "test@example.com");
    }

    #[tokio::test]
    async fn require_auth_fails_without_user() {
        use axum::extract::FromRequestParts;

        let request: axum::http::Request<()> = axum::http::Request::builder()
            .uri("/test")
            .body(())
            .unwrap();
        let (mut parts, _body) = request.into_parts();

        let result = RequireAuth::from_request_parts(&mut parts, &()).await;

        assert!(matches!(result, Err(AuthRejection::Unauthenticated)));
    }

    #[test]
    fn auth_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AuthState>();
    }
}
