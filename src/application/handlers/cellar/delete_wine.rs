//! DeleteWineHandler - Command handler for removing a wine.

use std::sync::Arc;

use crate::domain::cellar::CellarError;
use crate::domain::foundation::{UserId, WineId};
use crate::ports::{ImageStorage, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct DeleteWineCommand {
    pub user_id: UserId,
    pub wine_id: WineId,
}

#[derive(Debug, Clone)]
pub struct DeleteWineResult {
    pub wine_id: WineId,
}

/// Reviews and tasting notes go with the wine. The stored image is
/// removed afterwards on a best-effort basis.
pub struct DeleteWineHandler {
    wines: Arc<dyn WineRepository>,
    images: Arc<dyn ImageStorage>,
}

impl DeleteWineHandler {
    pub fn new(wines: Arc<dyn WineRepository>, images: Arc<dyn ImageStorage>) -> Self {
        Self { wines, images }
    }

    pub async fn handle(&self, cmd: DeleteWineCommand) -> Result<DeleteWineResult, CellarError> {
        let wine = access::owned_wine(self.wines.as_ref(), &cmd.wine_id, &cmd.user_id).await?;

        self.wines.delete_owned(&wine.id, &cmd.user_id).await?;

        if !wine.image_url.is_empty() {
            if let Err(e) = self.images.delete(&wine.image_url).await {
                tracing::warn!(wine_id = %wine.id, error = %e, "Failed to delete wine image");
            }
        }

        tracing::info!(user_id = %cmd.user_id, wine_id = %wine.id, "Wine deleted");
        Ok(DeleteWineResult { wine_id: wine.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InlineImageStorage;
    use crate::application::handlers::test_support;
    use crate::domain::cellar::{Review, ReviewDraft, ReviewForm, TastingNote};
    use crate::domain::foundation::Timestamp;
    use crate::domain::subscription::SubscriptionTier;
    use crate::ports::{ReviewRepository, TastingNoteRepository};

    #[tokio::test]
    async fn removes_wine_with_children() {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Pro).await;
        let wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        let keep = test_support::insert_wine(&store, &user.id, "Chablis").await;
        let form = ReviewForm {
            reviewer: "Me".to_string(),
            content: "Great".to_string(),
            ..ReviewForm::default()
        };
        let review = Review::create(wine.id, ReviewDraft::from_form(form, "2024-01-01").unwrap());
        ReviewRepository::create(store.as_ref(), &review).await.unwrap();
        let note = TastingNote::create(wine.id, "Cherry", Timestamp::now()).unwrap();
        TastingNoteRepository::create(store.as_ref(), &note).await.unwrap();

        DeleteWineHandler::new(store.clone(), Arc::new(InlineImageStorage::new()))
            .handle(DeleteWineCommand {
                user_id: user.id,
                wine_id: wine.id,
            })
            .await
            .unwrap();

        assert_eq!(store.wine_count(), 1);
        assert!(store.find_owned(&keep.id, &user.id).await.unwrap().is_some());
        assert_eq!(store.review_count(), 0);
        assert_eq!(store.tasting_note_count(), 0);
    }

    #[tokio::test]
    async fn other_users_wine_is_untouched() {
        let store = test_support::store();
        let owner = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Free).await;
        let other = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Free).await;
        let wine = test_support::insert_wine(&store, &owner.id, "Barolo").await;

        let err = DeleteWineHandler::new(store.clone(), Arc::new(InlineImageStorage::new()))
            .handle(DeleteWineCommand {
                user_id: other.id,
                wine_id: wine.id,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::wine_not_found());
        assert_eq!(store.wine_count(), 1);
    }
}
