//! DeleteTastingNoteHandler - Command handler for removing a tasting note.

use std::sync::Arc;

use crate::domain::cellar::CellarError;
use crate::domain::foundation::{TastingNoteId, UserId, WineId};
use crate::ports::{TastingNoteRepository, UserRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct DeleteTastingNoteCommand {
    pub user_id: UserId,
    pub note_id: TastingNoteId,
}

#[derive(Debug, Clone)]
pub struct DeleteTastingNoteResult {
    pub wine_id: WineId,
}

pub struct DeleteTastingNoteHandler {
    users: Arc<dyn UserRepository>,
    wines: Arc<dyn WineRepository>,
    notes: Arc<dyn TastingNoteRepository>,
}

impl DeleteTastingNoteHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        wines: Arc<dyn WineRepository>,
        notes: Arc<dyn TastingNoteRepository>,
    ) -> Self {
        Self { users, wines, notes }
    }

    pub async fn handle(
        &self,
        cmd: DeleteTastingNoteCommand,
    ) -> Result<DeleteTastingNoteResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &cmd.user_id).await?;
        access::require_pro(&user)?;

        let note = access::owned_tasting_note(
            self.notes.as_ref(),
            self.wines.as_ref(),
            &cmd.note_id,
            &user.id,
        )
        .await?;
        self.notes.delete(&note.id).await?;

        tracing::info!(user_id = %user.id, note_id = %note.id, "Tasting note deleted");
        Ok(DeleteTastingNoteResult {
            wine_id: note.wine_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCellar;
    use crate::application::handlers::test_support;
    use crate::domain::cellar::TastingNote;
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::SubscriptionTier;

    async fn seeded(tier: SubscriptionTier) -> (Arc<InMemoryCellar>, UserId, TastingNote) {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", tier).await;
        let wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        let note = TastingNote::create(wine.id, "Cherry", Timestamp::now()).unwrap();
        TastingNoteRepository::create(store.as_ref(), &note).await.unwrap();
        (store, user.id, note)
    }

    fn handler(store: &Arc<InMemoryCellar>) -> DeleteTastingNoteHandler {
        DeleteTastingNoteHandler::new(store.clone(), store.clone(), store.clone())
    }

    #[tokio::test]
    async fn owner_deletes_note() {
        let (store, user_id, note) = seeded(SubscriptionTier::Pro).await;

        let result = handler(&store)
            .handle(DeleteTastingNoteCommand {
                user_id,
                note_id: note.id,
            })
            .await
            .unwrap();

        assert_eq!(result.wine_id, note.wine_id);
        assert_eq!(store.tasting_note_count(), 0);
    }

    #[tokio::test]
    async fn free_user_is_refused() {
        let (store, user_id, note) = seeded(SubscriptionTier::Free).await;

        let err = handler(&store)
            .handle(DeleteTastingNoteCommand {
                user_id,
                note_id: note.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::ProRequired);
        assert_eq!(store.tasting_note_count(), 1);
    }

    #[tokio::test]
    async fn another_users_note_is_forbidden() {
        let (store, _owner, note) = seeded(SubscriptionTier::Pro).await;
        let intruder = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Pro).await;

        let err = handler(&store)
            .handle(DeleteTastingNoteCommand {
                user_id: intruder.id,
                note_id: note.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::Forbidden);
    }
}
