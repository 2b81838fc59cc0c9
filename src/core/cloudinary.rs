//! Cloudinary image uploads (feature `cloudinary`).
//!
//! Implements [`AssetUploader`] against Cloudinary's unsigned upload API:
//! a single multipart POST carrying the image bytes and an upload preset,
//! with the durable `secure_url` in the response. Unsigned presets keep
//! API secrets off the device.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::error::{KeepError, Result};
use super::uploader::AssetUploader;

/// Settings for one Cloudinary account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudinaryConfig {
    /// The account's cloud name, as shown in the Cloudinary console.
    pub cloud_name: String,

    /// An unsigned upload preset enabled for the target folder.
    pub upload_preset: String,
}

/// [`AssetUploader`] backed by Cloudinary's unsigned upload endpoint.
pub struct CloudinaryUploader {
    config: CloudinaryConfig,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudinaryUploader {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.config.cloud_name
        )
    }
}

#[async_trait]
impl AssetUploader for CloudinaryUploader {
    /// Reads the image from disk and posts it. `file://` prefixes are
    /// stripped; `content://` references cannot be resolved outside the
    /// mobile platform and fail as unreadable.
    async fn upload(&self, local_reference: &str) -> Result<String> {
        let path = local_reference
            .strip_prefix("file://")
            .unwrap_or(local_reference);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| KeepError::Upload(format!("cannot read {local_reference}: {err}")))?;

        let file_name = format!("note_{}.jpg", Utc::now().timestamp_millis());
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("image/jpeg")
            .map_err(|err| KeepError::Upload(err.to_string()))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone());

        let response = self
            .client
            .post(self.endpoint())
            .multipart(form)
            .send()
            .await
            .map_err(|err| KeepError::Upload(err.to_string()))?;

        if !response.status().is_success() {
            return Err(KeepError::Upload(format!(
                "asset host returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|err| KeepError::Upload(err.to_string()))?;
        Ok(body.secure_url)
    }
}
