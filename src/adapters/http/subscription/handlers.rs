//! HTTP handlers for billing endpoints.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::Redirect;

use crate::adapters::http::error::AppError;
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::subscription::{
    HandlePaymentWebhookCommand, OpenBillingPortalCommand, StartCheckoutCommand,
};
use crate::domain::subscription::SubscriptionError;

const SIGNATURE_HEADER: &str = "Stripe-Signature";

/// GET|POST /create-checkout-session
pub async fn create_checkout_session(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Redirect, AppError> {
    let result = state
        .start_checkout_handler()?
        .handle(StartCheckoutCommand { user_id: auth.id })
        .await?;

    Ok(Redirect::to(&result.session.url))
}

/// GET|POST /create-portal-session
pub async fn create_portal_session(
    State(state): State<AppState>,
    RequireAuth(auth): RequireAuth,
) -> Result<Redirect, AppError> {
    let result = state
        .billing_portal_handler()?
        .handle(OpenBillingPortalCommand { user_id: auth.id })
        .await?;

    Ok(Redirect::to(&result.session.url))
}

/// POST /webhook
///
/// Every verified event is acknowledged with 200, including events for
/// unknown customers. Only infrastructure failures ask Stripe to retry.
pub async fn handle_stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| SubscriptionError::invalid_webhook("Missing Stripe-Signature header"))?;

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    let result = state.webhook_handler()?.handle(cmd).await?;
    tracing::debug!(outcome = ?result, "Webhook processed");

    Ok(StatusCode::OK)
}
