//! AddWineHandler - Command handler for adding a wine to the cellar.

use std::sync::Arc;

use crate::domain::cellar::{CellarError, Wine, WineDraft, WineForm};
use crate::domain::foundation::UserId;
use crate::ports::{ImageStorage, ImageUpload, UserRepository, WineRepository};

use super::access;

#[derive(Debug, Clone)]
pub struct AddWineCommand {
    pub user_id: UserId,
    pub form: WineForm,
    pub image: Option<ImageUpload>,
}

#[derive(Debug, Clone)]
pub struct AddWineResult {
    pub wine: Wine,
}

/// Enforces the free-tier wine limit before anything is stored.
pub struct AddWineHandler {
    users: Arc<dyn UserRepository>,
    wines: Arc<dyn WineRepository>,
    images: Arc<dyn ImageStorage>,
}

impl AddWineHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        wines: Arc<dyn WineRepository>,
        images: Arc<dyn ImageStorage>,
    ) -> Self {
        Self {
            users,
            wines,
            images,
        }
    }

    pub async fn handle(&self, cmd: AddWineCommand) -> Result<AddWineResult, CellarError> {
        let user = access::load_user(self.users.as_ref(), &cmd.user_id).await?;

        let count = self.wines.count_for_user(&user.id).await?;
        if user.limits().wine_limit_reached(count) {
            tracing::info!(user_id = %user.id, count, "Free tier wine limit reached");
            return Err(CellarError::WineLimitReached);
        }

        let draft = WineDraft::from_form(cmd.form)?;

        let image_url = match cmd.image {
            Some(image) if !image.bytes.is_empty() => Some(self.images.store(&user.id, image).await?),
            _ => None,
        };

        let wine = Wine::create(user.id, draft, image_url);
        self.wines.create(&wine).await?;

        tracing::info!(user_id = %user.id, wine_id = %wine.id, "Wine added");
        Ok(AddWineResult { wine })
    }
}
