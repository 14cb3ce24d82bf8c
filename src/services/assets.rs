//! Remote image hosting (Cloudinary-compatible API)

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::time::Duration;
use utoipa::ToSchema;

use crate::{
    config::AssetsConfig,
    error::{AppError, AppResult},
};

/// Image file received from an admin upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedAsset {
    pub url: String,
    pub public_id: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn upload(&self, file: ImageUpload) -> AppResult<UploadedAsset>;
    /// Delete by public id; `Ok(false)` when the host reports nothing was removed
    async fn delete(&self, public_id: &str) -> AppResult<bool>;
}

/// Extract the public id from a hosted image URL: the part after `/v<digits>/`
/// up to the last `.`. Returns `None` for URLs that don't follow that layout.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let mut search_from = 0;
    while let Some(pos) = url[search_from..].find("/v") {
        let start = search_from + pos + 2;
        let digits = url[start..].bytes().take_while(u8::is_ascii_digit).count();
        let after = start + digits;
        if digits > 0 && url[after..].starts_with('/') {
            let rest = &url[after + 1..];
            return match rest.rfind('.') {
                Some(dot) if dot > 0 => Some(rest[..dot].to_string()),
                _ => None,
            };
        }
        search_from = start;
    }
    None
}

/// Delete the hosted images behind `urls`, logging failures instead of returning them.
/// URLs that are not hosted on the asset store are skipped. Returns the number deleted.
pub async fn delete_images_best_effort(assets: &dyn AssetStore, urls: &[String]) -> usize {
    let mut deleted = 0;
    for url in urls {
        let Some(public_id) = public_id_from_url(url) else {
            tracing::debug!(url = %url, "Image not hosted on asset store, skipping cleanup");
            continue;
        };
        match assets.delete(&public_id).await {
            Ok(true) => deleted += 1,
            Ok(false) => {
                tracing::warn!(public_id = %public_id, "Asset store did not delete image")
            }
            Err(e) => {
                tracing::warn!(public_id = %public_id, error = %e, "Failed to delete image from asset store")
            }
        }
    }
    deleted
}

/// Request signature: SHA-1 over the `&`-joined, key-sorted parameters followed by the secret
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Asset store backed by the Cloudinary upload API
#[derive(Clone)]
pub struct CloudinaryAssetStore {
    client: reqwest::Client,
    config: AssetsConfig,
}

impl CloudinaryAssetStore {
    pub fn new(config: AssetsConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        if config.cloud_name.is_empty() || config.api_key.is_empty() {
            tracing::warn!("Asset store credentials are not configured, uploads will fail");
        }
        Ok(Self { client, config })
    }

    fn endpoint(&self, action: &str) -> String {
        format!(
            "{}/{}/image/{}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.cloud_name,
            action
        )
    }
}

#[async_trait]
impl AssetStore for CloudinaryAssetStore {
    async fn upload(&self, file: ImageUpload) -> AppResult<UploadedAsset> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[
                ("folder", self.config.upload_folder.as_str()),
                ("timestamp", timestamp.as_str()),
            ],
            &self.config.api_secret,
        );

        let part = reqwest::multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| AppError::BadRequest(format!("Invalid content type: {}", e)))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.upload_folder.clone())
            .text("timestamp", timestamp)
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::AssetStore(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::AssetStore(format!("Upload rejected ({}): {}", status, body)));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::AssetStore(format!("Invalid upload response: {}", e)))?;

        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(UploadedAsset {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }

    async fn delete(&self, public_id: &str) -> AppResult<bool> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let response = self
            .client
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id),
                ("api_key", self.config.api_key.as_str()),
                ("timestamp", timestamp.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::AssetStore(format!("Delete request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::AssetStore(format!(
                "Delete rejected ({}) for {}",
                response.status(),
                public_id
            )));
        }

        let body: DestroyResponse = response
            .json()
            .await
            .map_err(|e| AppError::AssetStore(format!("Invalid delete response: {}", e)))?;

        Ok(body.result == "ok")
    }
}
