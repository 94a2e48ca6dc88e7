//! Account-specific error types.

use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};

/// Errors from signup, login, settings and account deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    InvalidCredentials,

    /// Signup with an email that already has an account.
    EmailTaken,

    /// The session refers to a user that no longer exists.
    UserNotFound,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl AccountError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::EmailTaken => ErrorCode::EmailTaken,
            AccountError::UserNotFound => ErrorCode::UserNotFound,
            AccountError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AccountError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AccountError::InvalidCredentials => "Invalid credentials".to_string(),
            AccountError::EmailTaken => "Email already exists".to_string(),
            AccountError::UserNotFound => "User not found".to_string(),
            AccountError::ValidationFailed { message, .. } => message.clone(),
            AccountError::Infrastructure(_) => "Server error".to_string(),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for AccountError {}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailTaken => AccountError::EmailTaken,
            ErrorCode::UserNotFound => AccountError::UserNotFound,
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AuthError> for AccountError {
    fn from(err: AuthError) -> Self {
        AccountError::Infrastructure(err.to_string())
    }
}
