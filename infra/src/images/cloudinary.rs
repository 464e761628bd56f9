//! Cloudinary signed uploads
//!
//! Uploads go to `{base_url}/{cloud_name}/image/upload` as multipart forms
//! signed with SHA-256 over the sorted upload parameters and the API secret.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Duration;

use bizreg_core::domain::entities::image::{ImageUpload, UploadedImage};
use bizreg_core::errors::{DomainError, DomainResult, ProviderError};
use bizreg_core::services::company::ImageHost;
use bizreg_shared::config::ImageHostConfig;

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Image host backed by Cloudinary
pub struct CloudinaryImageHost {
    client: Client,
    config: ImageHostConfig,
}

impl CloudinaryImageHost {
    pub fn new(config: ImageHostConfig) -> Result<Self, InfrastructureError> {
        if !config.is_configured() {
            return Err(InfrastructureError::Config(
                "Cloudinary cloud name, API key and API secret are required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.base_url.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    async fn send(
        &self,
        image: ImageUpload,
        folder: &str,
        public_id: &str,
    ) -> Result<UploadedImage, InfrastructureError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());
        params.insert("overwrite", "true".to_string());
        params.insert("public_id", public_id.to_string());
        params.insert("timestamp", timestamp);
        let signature = sign_params(&params, &self.config.api_secret);

        let file_name = image
            .file_name
            .clone()
            .unwrap_or_else(|| public_id.to_string());
        let file = multipart::Part::bytes(image.bytes)
            .file_name(file_name)
            .mime_str(&image.content_type)?;

        let mut form = multipart::Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (key, value) in params {
            form = form.text(key, value);
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("HTTP {}", status));
            return Err(InfrastructureError::ImageHost(message));
        }

        let uploaded: UploadResponse = response.json().await?;
        Ok(UploadedImage {
            url: uploaded.secure_url,
            public_id: uploaded.public_id,
        })
    }
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
        public_id: &str,
    ) -> DomainResult<UploadedImage> {
        let size = image.size();
        self.send(image, folder, public_id).await.map_err(|e| {
            tracing::error!(folder, public_id, size, error = %e, "Cloudinary upload failed");
            DomainError::from(ProviderError::ImageHost {
                message: e.to_string(),
            })
        })
    }
}

/// SHA-256 signature over `k=v` pairs joined by `&` in key order, followed
/// by the API secret
pub(crate) fn sign_params(params: &BTreeMap<&str, String>, api_secret: &str) -> String {
    let to_sign = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Local endpoint rejecting one upload the way Cloudinary does
    async fn rejecting_endpoint() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = Vec::new();
                let mut buffer = [0u8; 4096];
                while let Ok(n) = socket.read(&mut buffer).await {
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buffer[..n]);
                    if request.ends_with(b"--\r\n") {
                        break;
                    }
                }
                let body = r#"{"error":{"message":"Invalid image file"}}"#;
                let response = format!(
                    "HTTP/1.1 400 Bad Request\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        format!("http://{}/v1_1", address)
    }

    #[tokio::test]
    async fn test_rejected_upload_is_image_host_error() {
        let host = CloudinaryImageHost::new(ImageHostConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            base_url: rejecting_endpoint().await,
            timeout_seconds: 5,
        })
        .unwrap();
        let image = ImageUpload {
            bytes: vec![0x89, b'P', b'N', b'G'],
            content_type: "image/png".to_string(),
            file_name: Some("logo.png".to_string()),
        };

        let result = host.upload(image, "company-logos", "company-1-logo").await;

        match result {
            Err(DomainError::Provider(ProviderError::ImageHost { message })) => {
                assert_eq!(message, "Image host error: Invalid image file");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_requires_credentials() {
        assert!(CloudinaryImageHost::new(ImageHostConfig::default()).is_err());
    }

    #[test]
    fn test_upload_url() {
        let host = CloudinaryImageHost::new(ImageHostConfig {
            cloud_name: "demo".to_string(),
            api_key: "key".to_string(),
            api_secret: "secret".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(host.upload_url(), "https://api.cloudinary.com/v1_1/demo/image/upload");
    }

    #[test]
    fn test_signature_is_order_independent_and_secret_bound() {
        let mut a = BTreeMap::new();
        a.insert("timestamp", "1700000000".to_string());
        a.insert("public_id", "company-1-logo".to_string());
        let mut b = BTreeMap::new();
        b.insert("public_id", "company-1-logo".to_string());
        b.insert("timestamp", "1700000000".to_string());

        let signature = sign_params(&a, "secret");
        assert_eq!(signature, sign_params(&b, "secret"));
        assert_ne!(signature, sign_params(&a, "other"));
        assert_eq!(signature.len(), 64);
    }

    #[test]
    fn test_signature_matches_manual_digest() {
        let mut params = BTreeMap::new();
        params.insert("public_id", "x".to_string());
        params.insert("timestamp", "1".to_string());

        let expected = hex::encode(Sha256::digest(b"public_id=x&timestamp=1abc"));
        assert_eq!(sign_params(&params, "abc"), expected);
    }
}
