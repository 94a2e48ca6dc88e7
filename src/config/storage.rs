//! Object storage configuration (Cloudflare R2)

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// R2 credentials. Images are stored inline as data URLs unless all four
/// of account id, access key, secret key and bucket are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    pub r2_account_id: Option<String>,
    pub r2_access_key_id: Option<String>,
    pub r2_secret_access_key: Option<SecretString>,
    pub r2_bucket_name: Option<String>,
    /// Public base URL of the bucket, e.g. a custom domain
    pub r2_public_url: Option<String>,
}

/// Fully specified R2 settings.
#[derive(Debug, Clone)]
pub struct R2Settings {
    pub account_id: String,
    pub access_key_id: String,
    pub secret_access_key: SecretString,
    pub bucket: String,
    pub public_url: Option<String>,
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl StorageConfig {
    /// Returns the R2 settings when every required value is present.
    pub fn r2(&self) -> Option<R2Settings> {
        Some(R2Settings {
            account_id: present(&self.r2_account_id)?,
            access_key_id: present(&self.r2_access_key_id)?,
            secret_access_key: self.r2_secret_access_key.clone()?,
            bucket: present(&self.r2_bucket_name)?,
            public_url: present(&self.r2_public_url),
        })
    }

    /// Either nothing or everything required must be set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("R2_ACCOUNT_ID", present(&self.r2_account_id).is_some()),
            ("R2_ACCESS_KEY_ID", present(&self.r2_access_key_id).is_some()),
            ("R2_SECRET_ACCESS_KEY", self.r2_secret_access_key.is_some()),
            ("R2_BUCKET_NAME", present(&self.r2_bucket_name).is_some()),
        ];
        let any_set = required.iter().any(|(_, set)| *set);
        if let Some((name, _)) = required.iter().find(|(_, set)| !*set) {
            if any_set {
                return Err(ValidationError::IncompleteStorage(name));
            }
        }
        Ok(())
    }
}
