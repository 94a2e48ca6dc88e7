//! HTTP error type.
//!
//! Handlers return `Result<_, AppError>`. Each feature error maps to a
//! status code and a short plain-text page, the same message the user
//! would see in a browser.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidCredentials | 401 |
//! | EmailTaken | 409 |
//! | NotFound / UserNotFound | 404 |
//! | Forbidden / ProRequired / WineLimitReached | 403 |
//! | Validation / BadRequest / NoBillingAccount / InvalidWebhook | 400 |
//! | PaymentProvider | 502 |
//! | PaymentsDisabled | 503 |
//! | Infrastructure | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::account::AccountError;
use crate::domain::cellar::CellarError;
use crate::domain::subscription::SubscriptionError;

#[derive(Debug)]
pub enum AppError {
    Account(AccountError),
    Cellar(CellarError),
    Subscription(SubscriptionError),

    /// Malformed form or path input, e.g. an unparsable id.
    BadRequest(&'static str),

    /// Stripe isn't configured in this environment.
    PaymentsDisabled,

    /// Failures in the HTTP layer itself, such as building a header.
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Account(err) => match err {
                AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AccountError::EmailTaken => StatusCode::CONFLICT,
                AccountError::UserNotFound => StatusCode::NOT_FOUND,
                AccountError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                AccountError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Cellar(err) => match err {
                CellarError::NotFound(_) => StatusCode::NOT_FOUND,
                CellarError::Forbidden
                | CellarError::ProRequired
                | CellarError::WineLimitReached => StatusCode::FORBIDDEN,
                CellarError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
                CellarError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Subscription(err) => match err {
                SubscriptionError::UserNotFound(_) => StatusCode::NOT_FOUND,
                SubscriptionError::NoBillingAccount | SubscriptionError::InvalidWebhook(_) => {
                    StatusCode::BAD_REQUEST
                }
                SubscriptionError::PaymentProvider { .. } => StatusCode::BAD_GATEWAY,
                SubscriptionError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PaymentsDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the user. Never includes infrastructure details.
    pub fn message(&self) -> String {
        match self {
            AppError::Account(err) => err.message(),
            AppError::Cellar(err) => err.message(),
            AppError::Subscription(err) => err.message(),
            AppError::BadRequest(message) => message.to_string(),
            AppError::PaymentsDisabled => "Payments are not available".to_string(),
            AppError::Internal(_) => "Server error".to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Account(err) => write!(f, "{}", err),
            AppError::Cellar(err) => write!(f, "{}", err),
            AppError::Subscription(err) => write!(f, "{}", err),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        AppError::Account(err)
    }
}

impl From<CellarError> for AppError {
    fn from(err: CellarError) -> Self {
        AppError::Cellar(err)
    }
}

impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        AppError::Subscription(err)
    }
}

impl From<axum::http::header::InvalidHeaderValue> for AppError {
    fn from(err: axum::http::header::InvalidHeaderValue) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<handlebars::RenderError> for AppError {
    fn from(err: handlebars::RenderError) -> Self {
        AppError::Internal(format!("render: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, self.message()).into_response()
    }
}
