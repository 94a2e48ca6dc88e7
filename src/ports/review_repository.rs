//! Review repository port.
//!
//! Ownership is checked by the handlers through the parent wine.

use crate::domain::cellar::Review;
use crate::domain::foundation::{DomainError, ReviewId};
use async_trait::async_trait;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ReviewId) -> Result<Option<Review>, DomainError>;

    /// # Errors
    ///
    /// - `ReviewNotFound` if the review doesn't exist
    async fn update(&self, review: &Review) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `ReviewNotFound` if the review doesn't exist
    async fn delete(&self, id: &ReviewId) -> Result<(), DomainError>;
}
