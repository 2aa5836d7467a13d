//! Object storage client (Supabase-style storage REST API)
//!
//! Uploads listing images under `cars/{car_id}/` and removes the whole
//! folder when a listing is deleted.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::utils::errors::AppError;

lazy_static! {
    static ref DATA_URL_RE: Regex =
        Regex::new(r"^data:image/([a-zA-Z0-9+.-]+);base64,(.+)$").unwrap();
}

/// A decoded `data:image/...;base64,` payload
#[derive(Debug)]
pub struct ImagePayload {
    pub extension: String,
    pub bytes: Vec<u8>,
}

impl ImagePayload {
    pub fn mime_type(&self) -> String {
        format!("image/{}", self.extension)
    }
}

/// Parse a data URL; anything that is not a base64 image yields `None`.
pub fn parse_data_url(data_url: &str) -> Option<ImagePayload> {
    let caps = DATA_URL_RE.captures(data_url)?;
    let extension = caps[1].to_string();
    let bytes = BASE64.decode(&caps[2]).ok()?;
    Some(ImagePayload { extension, bytes })
}

#[derive(Debug, Deserialize)]
struct StorageObject {
    name: String,
}

pub struct StorageClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl StorageClient {
    pub fn new(
        http: reqwest::Client,
        base_url: String,
        service_key: String,
        bucket: String,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, path
        )
    }

    /// Upload every valid image payload for a listing and return the
    /// public URLs in input order. Non-image entries are skipped.
    pub async fn upload_car_images(
        &self,
        car_id: Uuid,
        images: &[String],
    ) -> Result<Vec<String>, AppError> {
        let mut urls = Vec::new();

        for (index, data_url) in images.iter().enumerate() {
            let Some(payload) = parse_data_url(data_url) else {
                tracing::warn!("Skipping non-image payload at index {}", index);
                continue;
            };

            let path = format!(
                "cars/{}/image-{}-{}.{}",
                car_id,
                Utc::now().timestamp_millis(),
                index,
                payload.extension
            );

            let response = self
                .http
                .post(format!(
                    "{}/storage/v1/object/{}/{}",
                    self.base_url, self.bucket, path
                ))
                .bearer_auth(&self.service_key)
                .header(CONTENT_TYPE, payload.mime_type())
                .body(payload.bytes)
                .send()
                .await
                .map_err(|e| AppError::ExternalService(format!("Image upload failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(AppError::ExternalService(format!(
                    "Image upload failed with status {}",
                    response.status()
                )));
            }

            urls.push(self.public_url(&path));
        }

        Ok(urls)
    }

    /// List and delete every object under the listing's folder prefix.
    pub async fn delete_car_folder(&self, car_id: Uuid) -> Result<(), AppError> {
        let prefix = format!("cars/{}", car_id);

        let response = self
            .http
            .post(format!(
                "{}/storage/v1/object/list/{}",
                self.base_url, self.bucket
            ))
            .bearer_auth(&self.service_key)
            .json(&json!({ "prefix": prefix, "limit": 1000 }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Storage list failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Storage list failed with status {}",
                response.status()
            )));
        }

        let objects: Vec<StorageObject> = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("Storage list was not JSON: {}", e)))?;

        if objects.is_empty() {
            return Ok(());
        }

        let prefixes: Vec<String> = objects
            .iter()
            .map(|o| format!("{}/{}", prefix, o.name))
            .collect();

        let response = self
            .http
            .delete(format!("{}/storage/v1/object/{}", self.base_url, self.bucket))
            .bearer_auth(&self.service_key)
            .json(&json!({ "prefixes": prefixes }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Storage delete failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Storage delete failed with status {}",
                response.status()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_url() {
        let payload = parse_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(payload.extension, "png");
        assert_eq!(payload.mime_type(), "image/png");
        assert_eq!(payload.bytes, b"hello");
    }

    #[test]
    fn test_parse_rejects_non_image_payloads() {
        assert!(parse_data_url("data:text/plain;base64,aGVsbG8=").is_none());
        assert!(parse_data_url("https://example.com/a.png").is_none());
        assert!(parse_data_url("data:image/png;base64,!!!not-base64!!!").is_none());
    }

    #[test]
    fn test_public_url_shape() {
        let client = StorageClient::new(
            reqwest::Client::new(),
            "https://proj.supabase.co/".to_string(),
            "service-key".to_string(),
            "car-images".to_string(),
        );
        assert_eq!(
            client.public_url("cars/abc/image-1.png"),
            "https://proj.supabase.co/storage/v1/object/public/car-images/cars/abc/image-1.png"
        );
    }
}
