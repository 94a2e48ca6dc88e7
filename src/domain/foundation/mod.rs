//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, authentication identity and the error
//! vocabulary used by every other domain module.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ReviewId, TastingNoteId, UserId, WineId};
pub use timestamp::{is_iso_date, Timestamp};
