//! EditWineHandler - Command handler for updating a wine.

use std::sync::Arc;

use crate::domain::cellar::{CellarError, Wine, WineDraft, WineForm};
use crate::domain::foundation::{UserId, WineId};
use crate::ports::{ImageStorage, ImageUpload, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct EditWineCommand {
    pub user_id: UserId,
    pub wine_id: WineId,
    pub form: WineForm,
    /// Replaces the current image when present and non-empty.
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct EditWineResult {
    pub wine: Wine,
}

pub struct EditWineHandler {
    wines: Arc<dyn WineRepository>,
    images: Arc<dyn ImageStorage>,
}

impl EditWineHandler {
    pub fn new(wines: Arc<dyn WineRepository>, images: Arc<dyn ImageStorage>) -> Self {
        Self { wines, images }
    }

    pub async fn handle(&self, cmd: EditWineCommand) -> Result<EditWineResult, CellarError> {
        let mut wine = access::owned_wine(self.wines.as_ref(), &cmd.wine_id, &cmd.user_id).await?;
        let draft = WineDraft::from_form(cmd.form)?;
        wine.apply(draft);

        let replaced_url = match cmd.image {
            Some(image) if !image.bytes.is_empty() => {
                let new_url = self.images.store(&cmd.user_id, image).await?;
                Some(std::mem::replace(&mut wine.image_url, new_url))
            }
            _ => None,
        };

        self.wines.update(&wine).await?;

        if let Some(old_url) = replaced_url.filter(|url| !url.is_empty()) {
            if let Err(e) = self.images.delete(&old_url).await {
                tracing::warn!(wine_id = %wine.id, error = %e, "Failed to delete replaced image");
            }
        }

        tracing::info!(user_id = %cmd.user_id, wine_id = %wine.id, "Wine updated");
        Ok(EditWineResult { wine })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCellar;
    use crate::application::handlers::test_support;
    use crate::domain::foundation::DomainError;
    use crate::domain::subscription::SubscriptionTier;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct RecordingImageStorage {
        stored: Mutex<Vec<UserId>>,
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ImageStorage for RecordingImageStorage {
        async fn store(&self, owner: &UserId, _image: ImageUpload) -> Result<String, DomainError> {
            let mut stored = self.stored.lock().unwrap();
            stored.push(*owner);
            Ok(format!("https://images.example.com/{}", stored.len()))
        }

        async fn delete(&self, url: &str) -> Result<(), DomainError> {
            self.deleted.lock().unwrap().push(url.to_string());
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    async fn setup() -> (Arc<InMemoryCellar>, Arc<RecordingImageStorage>, UserId, Wine) {
        let store = test_support::store();
        let user = test_support::insert_user(&store, "a@example.com", SubscriptionTier::Free).await;
        let mut wine = test_support::insert_wine(&store, &user.id, "Barolo").await;
        wine.image_url = "https://images.example.com/old".to_string();
        WineRepository::update(store.as_ref(), &wine).await.unwrap();
        (store, Arc::new(RecordingImageStorage::default()), user.id, wine)
    }

    fn form(name: &str) -> WineForm {
        test_support::wine_form(name)
    }

    #[tokio::test]
    async fn updates_fields_and_keeps_image_without_upload() {
        let (store, images, user_id, wine) = setup().await;
        let handler = EditWineHandler::new(store.clone(), images.clone());

        let result = handler
            .handle(EditWineCommand {
                user_id,
                wine_id: wine.id,
                form: form("Barolo Riserva"),
                image: None,
            })
            .await
            .unwrap();

        assert_eq!(result.wine.name, "Barolo Riserva");
        assert_eq!(result.wine.image_url, "https://images.example.com/old");
        assert!(images.deleted.lock().unwrap().is_empty());
        let stored = store.find_owned(&wine.id, &user_id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Barolo Riserva");
    }

    #[tokio::test]
    async fn new_upload_replaces_and_deletes_old_image() {
        let (store, images, user_id, wine) = setup().await;
        let handler = EditWineHandler::new(store, images.clone());

        let result = handler
            .handle(EditWineCommand {
                user_id,
                wine_id: wine.id,
                form: form("Barolo"),
                image: Some(ImageUpload::new(vec![1, 2, 3], "image/jpeg")),
            })
            .await
            .unwrap();

        assert_eq!(result.wine.image_url, "https://images.example.com/1");
        assert_eq!(
            *images.deleted.lock().unwrap(),
            vec!["https://images.example.com/old".to_string()]
        );
    }

    #[tokio::test]
    async fn other_users_wine_is_not_found() {
        let (store, images, _owner, wine) = setup().await;
        let intruder = test_support::insert_user(&store, "b@example.com", SubscriptionTier::Pro).await;
        let handler = EditWineHandler::new(store, images);

        let err = handler
            .handle(EditWineCommand {
                user_id: intruder.id,
                wine_id: wine.id,
                form: form("Mine now"),
                image: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err, CellarError::wine_not_found());
    }
}
