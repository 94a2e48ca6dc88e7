//! Label image storage adapters.
//!
//! - **R2ImageStorage** - uploads to Cloudflare R2 and returns a public URL
//! - **InlineImageStorage** - embeds the image as a `data:` URL
//!
//! ## Usage
//!
//! ```ignore
//! let images = adapters::storage::from_config(&config.storage);
//! ```

mod inline_image_storage;
mod r2_image_storage;
mod sigv4;

pub use inline_image_storage::InlineImageStorage;
pub use r2_image_storage::R2ImageStorage;
pub use sigv4::{SigV4Signer, SignableRequest};

use std::sync::Arc;

use crate::config::StorageConfig;
use crate::ports::ImageStorage;

/// R2 when fully configured, inline data URLs otherwise.
pub fn from_config(config: &StorageConfig) -> Arc<dyn ImageStorage> {
    match config.r2() {
        Some(settings) => {
            tracing::info!(bucket = %settings.bucket, "R2 image storage enabled");
            Arc::new(R2ImageStorage::new(settings))
        }
        None => {
            tracing::info!("R2 storage not configured, images are stored inline");
            Arc::new(InlineImageStorage::new())
        }
    }
}
