//! Wine repository port (write side).
//!
//! Every lookup takes the owner's id. A wine owned by someone else is
//! indistinguishable from a missing one.

use crate::domain::cellar::Wine;
use crate::domain::foundation::{DomainError, UserId, WineId};
use async_trait::async_trait;

#[async_trait]
pub trait WineRepository: Send + Sync {
    async fn create(&self, wine: &Wine) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `WineNotFound` if no wine with this id belongs to `wine.user_id`
    async fn update(&self, wine: &Wine) -> Result<(), DomainError>;

    async fn find_owned(&self, id: &WineId, user_id: &UserId) -> Result<Option<Wine>, DomainError>;

    async fn count_for_user(&self, user_id: &UserId) -> Result<u32, DomainError>;

    /// # Errors
    ///
    /// - `WineNotFound` if the wine isn't the user's
    async fn set_quantity(
        &self,
        id: &WineId,
        user_id: &UserId,
        quantity: i32,
    ) -> Result<(), DomainError>;

    /// Deletes the wine along with its reviews and tasting notes.
    ///
    /// # Errors
    ///
    /// - `WineNotFound` if the wine isn't the user's
    async fn delete_owned(&self, id: &WineId, user_id: &UserId) -> Result<(), DomainError>;

    /// Whether the table holds any wine at all. Used to decide seeding.
    async fn has_any(&self) -> Result<bool, DomainError>;
}
