//! Cellar-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors from wine, review and tasting-note operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellarError {
    /// The record doesn't exist, or exists but isn't the caller's wine.
    NotFound(&'static str),

    /// The record exists but belongs to another user's wine.
    Forbidden,

    /// Reviews, tasting notes and search need a Pro subscription.
    ProRequired,

    /// Free tier has hit its wine limit.
    WineLimitReached,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl CellarError {
    pub fn wine_not_found() -> Self {
        CellarError::NotFound("Wine")
    }

    pub fn review_not_found() -> Self {
        CellarError::NotFound("Review")
    }

    pub fn tasting_note_not_found() -> Self {
        CellarError::NotFound("Tasting note")
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CellarError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CellarError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CellarError::NotFound("Wine") => ErrorCode::WineNotFound,
            CellarError::NotFound("Review") => ErrorCode::ReviewNotFound,
            CellarError::NotFound("Tasting note") => ErrorCode::TastingNoteNotFound,
            CellarError::NotFound(_) => ErrorCode::NotFound,
            CellarError::Forbidden => ErrorCode::Forbidden,
            CellarError::ProRequired => ErrorCode::ProRequired,
            CellarError::WineLimitReached => ErrorCode::WineLimitReached,
            CellarError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CellarError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// Text shown to the user.
    pub fn message(&self) -> String {
        match self {
            CellarError::NotFound(what) => format!("{} not found", what),
            CellarError::Forbidden => "Forbidden".to_string(),
            CellarError::ProRequired => "Pro subscription required".to_string(),
            CellarError::WineLimitReached => {
                "Free tier limit reached. Upgrade to Pro to add more wines.".to_string()
            }
            CellarError::ValidationFailed { message, .. } => message.clone(),
            CellarError::Infrastructure(_) => "Server error".to_string(),
        }
    }
}

impl std::fmt::Display for CellarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellarError::Infrastructure(msg) => write!(f, "Infrastructure error: {}", msg),
            other => write!(f, "{}", other.message()),
        }
    }
}

impl std::error::Error for CellarError {}

impl From<ValidationError> for CellarError {
    fn from(err: ValidationError) -> Self {
        CellarError::validation(err.field().to_string(), err.to_string())
    }
}

impl From<DomainError> for CellarError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::WineNotFound => CellarError::wine_not_found(),
            ErrorCode::ReviewNotFound => CellarError::review_not_found(),
            ErrorCode::TastingNoteNotFound => CellarError::tasting_note_not_found(),
            ErrorCode::NotFound => CellarError::NotFound("Record"),
            ErrorCode::Forbidden => CellarError::Forbidden,
            _ => CellarError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_message_mentions_upgrade() {
        assert!(CellarError::WineLimitReached.message().contains("Upgrade to Pro"));
    }

    #[test]
    fn not_found_codes_are_specific() {
        assert_eq!(CellarError::wine_not_found().code(), ErrorCode::WineNotFound);
        assert_eq!(CellarError::review_not_found().code(), ErrorCode::ReviewNotFound);
        assert_eq!(CellarError::NotFound("Record").code(), ErrorCode::NotFound);
    }

    #[test]
    fn domain_not_found_maps_through() {
        let err: CellarError = DomainError::new(ErrorCode::WineNotFound, "gone").into();
        assert_eq!(err, CellarError::wine_not_found());
    }

    #[test]
    fn database_errors_become_infrastructure() {
        let err: CellarError = DomainError::database("load wine", "timeout").into();
        assert!(matches!(err, CellarError::Infrastructure(_)));
        assert_eq!(err.message(), "Server error");
    }
}
