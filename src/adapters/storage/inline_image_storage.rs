//! Image storage that embeds the image in the URL itself.
//!
//! Used when R2 is not configured. The whole image ends up in the
//! `image_url` column as a `data:` URL.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{ImageStorage, ImageUpload};

#[derive(Debug, Clone, Copy, Default)]
pub struct InlineImageStorage;

impl InlineImageStorage {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageStorage for InlineImageStorage {
    async fn store(&self, _owner: &UserId, image: ImageUpload) -> Result<String, DomainError> {
        Ok(format!(
            "data:{};base64,{}",
            image.mime_type(),
            STANDARD.encode(&image.bytes)
        ))
    }

    async fn delete(&self, _url: &str) -> Result<(), DomainError> {
        Ok(())
    }
}
