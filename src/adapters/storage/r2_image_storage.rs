//! Cloudflare R2 image storage over the S3 API.

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::R2Settings;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{ImageStorage, ImageUpload};

use super::sigv4::{uri_encode_path, SigV4Signer, SignableRequest};

/// R2 ignores the region but SigV4 needs one.
const R2_REGION: &str = "auto";

/// Stores label photos as public R2 objects under `wines/{user}/`.
pub struct R2ImageStorage {
    bucket: String,
    host: String,
    endpoint: String,
    public_url: Option<String>,
    signer: SigV4Signer,
    http_client: reqwest::Client,
}

impl R2ImageStorage {
    pub fn new(settings: R2Settings) -> Self {
        let host = format!("{}.r2.cloudflarestorage.com", settings.account_id);
        Self {
            endpoint: format!("https://{}", host),
            host,
            public_url: settings
                .public_url
                .map(|url| url.trim_end_matches('/').to_string()),
            signer: SigV4Signer::new(
                settings.access_key_id,
                settings.secret_access_key,
                R2_REGION,
                "s3",
            ),
            bucket: settings.bucket,
            http_client: reqwest::Client::new(),
        }
    }

    fn object_key(owner: &UserId, mime_type: &str) -> String {
        format!("wines/{}/{}{}", owner, Uuid::new_v4(), extension_for(mime_type))
    }

    /// Public URL of an object: the custom domain when configured, otherwise
    /// the bucket's r2.dev address.
    fn public_url_for(&self, key: &str) -> String {
        match &self.public_url {
            Some(base) => format!("{}/{}", base, key),
            None => format!("https://{}.r2.dev/{}", self.bucket, key),
        }
    }

    /// Object key for a URL this storage produced, `None` for anything else.
    fn key_from_url(&self, url: &str) -> Option<String> {
        if let Some(base) = &self.public_url {
            if let Some(key) = url.strip_prefix(base.as_str()).and_then(|rest| rest.strip_prefix('/')) {
                return Some(key.to_string()).filter(|k| !k.is_empty());
            }
        }
        url.split_once(".r2.dev/")
            .map(|(_, key)| key.to_string())
            .filter(|k| !k.is_empty())
    }

    async fn send(
        &self,
        method: reqwest::Method,
        key: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Result<reqwest::Response, String> {
        let path = format!("/{}/{}", self.bucket, key);
        let extra_headers: Vec<(&str, &str)> = content_type
            .map(|ct| vec![("content-type", ct)])
            .unwrap_or_default();

        let signed = self.signer.sign(
            &SignableRequest {
                method: method.as_str(),
                host: &self.host,
                path: &path,
                headers: &extra_headers,
                payload: &body,
            },
            chrono::Utc::now(),
        )?;

        let mut request = self
            .http_client
            .request(method, format!("{}{}", self.endpoint, uri_encode_path(&path)));
        for (name, value) in extra_headers.iter().copied() {
            request = request.header(name, value);
        }
        for (name, value) in signed {
            request = request.header(name, value);
        }

        request.body(body).send().await.map_err(|e| e.to_string())
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        _ => ".jpg",
    }
}

fn storage_error(operation: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::StorageError,
        format!("Failed to {} R2: {}", operation, err),
    )
}

#[async_trait]
impl ImageStorage for R2ImageStorage {
    async fn store(&self, owner: &UserId, image: ImageUpload) -> Result<String, DomainError> {
        let mime_type = image.mime_type();
        let key = Self::object_key(owner, &mime_type);

        let response = self
            .send(reqwest::Method::PUT, &key, Some(mime_type.as_str()), image.bytes)
            .await
            .map_err(|e| storage_error("upload to", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(storage_error("upload to", format!("{} {}", status, body)));
        }

        tracing::debug!(user_id = %owner, key = %key, "Stored label image in R2");
        Ok(self.public_url_for(&key))
    }

    async fn delete(&self, url: &str) -> Result<(), DomainError> {
        let Some(key) = self.key_from_url(url) else {
            return Ok(());
        };

        let response = self
            .send(reqwest::Method::DELETE, &key, None, Vec::new())
            .await
            .map_err(|e| storage_error("delete from", e))?;

        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(storage_error("delete from", status));
        }

        tracing::debug!(key = %key, "Deleted label image from R2");
        Ok(())
    }
}
