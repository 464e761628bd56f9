//! Image host integration

use async_trait::async_trait;

use crate::domain::entities::image::{ImageUpload, UploadedImage};
use crate::errors::DomainResult;

/// Trait for the external image host
///
/// Uploads always overwrite an existing object with the same `public_id`, so
/// re-uploading a logo replaces it instead of accumulating copies.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload an image under `folder/public_id`
    ///
    /// # Returns
    /// * `Ok(UploadedImage)` - Durable HTTPS URL and the stored object id
    /// * `Err(ProviderError::ImageHost)` - The host rejected or failed the upload
    async fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
        public_id: &str,
    ) -> DomainResult<UploadedImage>;
}
