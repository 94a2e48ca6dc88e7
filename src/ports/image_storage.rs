//! Image storage port for wine label photos.

use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// An uploaded image, before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    /// As declared by the browser. May be empty or wrong.
    pub content_type: String,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Sniffed MIME type, falling back to the declared one, then JPEG.
    pub fn mime_type(&self) -> String {
        if let Some(mime) = sniff_image(&self.bytes) {
            return mime.to_string();
        }
        if self.content_type.starts_with("image/") {
            return self.content_type.clone();
        }
        "image/jpeg".to_string()
    }
}

/// Image type from magic bytes.
fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        [b'B', b'M', ..] => Some("image/bmp"),
        _ => None,
    }
}

/// Stores images and hands back a URL usable in `<img src>`.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn store(&self, owner: &UserId, image: ImageUpload) -> Result<String, DomainError>;

    /// Removes a previously stored image. URLs this storage didn't produce
    /// are ignored.
    async fn delete(&self, url: &str) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn image_storage_is_object_safe() {
        fn _accepts_dyn(_storage: &dyn ImageStorage) {}
    }

    #[test]
    fn sniffed_type_beats_declared_type() {
        let upload = ImageUpload::new(PNG_HEADER.to_vec(), "image/jpeg");
        assert_eq!(upload.mime_type(), "image/png");
    }

    #[test]
    fn recognizes_common_label_formats() {
        assert_eq!(sniff_image(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_image(b"GIF89a...."), Some("image/gif"));
        assert_eq!(sniff_image(b"RIFF\x10\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image(b"%PDF-1.7"), None);
    }

    #[test]
    fn declared_type_used_when_sniffing_fails() {
        let upload = ImageUpload::new(vec![1, 2, 3], "image/webp");
        assert_eq!(upload.mime_type(), "image/webp");
        let upload = ImageUpload::new(vec![1, 2, 3], "application/octet-stream");
        assert_eq!(upload.mime_type(), "image/jpeg");
    }
}
