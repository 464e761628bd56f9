//! In-memory image host for tests

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::domain::entities::image::{ImageUpload, UploadedImage};
use crate::errors::{DomainResult, ProviderError};

use super::traits::ImageHost;

/// Mock image host recording every upload
#[derive(Default)]
pub struct MockImageHost {
    uploads: Mutex<Vec<(String, usize)>>,
    fail: AtomicBool,
}

impl MockImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail
    pub fn fail_uploads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Object ids (folder included) and sizes of received uploads
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ImageHost for MockImageHost {
    async fn upload(
        &self,
        image: ImageUpload,
        folder: &str,
        public_id: &str,
    ) -> DomainResult<UploadedImage> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ProviderError::ImageHost {
                message: "upload failed".to_string(),
            }
            .into());
        }
        let object_id = format!("{}/{}", folder, public_id);
        if let Ok(mut uploads) = self.uploads.lock() {
            uploads.push((object_id.clone(), image.size()));
        }
        Ok(UploadedImage {
            url: format!("https://images.test/{}.png", object_id),
            public_id: object_id,
        })
    }
}
