//! Tasting note repository port.

use crate::domain::cellar::TastingNote;
use crate::domain::foundation::{DomainError, TastingNoteId};
use async_trait::async_trait;

#[async_trait]
pub trait TastingNoteRepository: Send + Sync {
    async fn create(&self, note: &TastingNote) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &TastingNoteId) -> Result<Option<TastingNote>, DomainError>;

    /// # Errors
    ///
    /// - `TastingNoteNotFound` if the note doesn't exist
    async fn delete(&self, id: &TastingNoteId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tasting_note_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn TastingNoteRepository) {}
    }
}
