//! Image upload types shared by the company service and the image host.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One mebibyte
pub const MIB: usize = 1024 * 1024;

/// Which company image is being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKind {
    Logo,
    Banner,
}

impl ImageKind {
    /// Upload size ceiling in bytes (inclusive)
    pub fn max_bytes(&self) -> usize {
        match self {
            ImageKind::Logo => 5 * MIB,
            ImageKind::Banner => 10 * MIB,
        }
    }

    /// Folder on the image host
    pub fn folder(&self) -> &'static str {
        match self {
            ImageKind::Logo => "company-logos",
            ImageKind::Banner => "company-banners",
        }
    }

    /// Deterministic object id; re-uploading overwrites the previous image
    pub fn public_id(&self, profile_id: Uuid) -> String {
        format!("company-{}-{}", profile_id, self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKind::Logo => "logo",
            ImageKind::Banner => "banner",
        }
    }
}

/// An image received from a client, ready to be validated and uploaded
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl ImageUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Result of a successful upload to the image host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    /// Durable HTTPS URL
    pub url: String,
    /// Object id on the image host (folder included)
    pub public_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceilings() {
        assert_eq!(ImageKind::Logo.max_bytes(), 5_242_880);
        assert_eq!(ImageKind::Banner.max_bytes(), 10_485_760);
    }

    #[test]
    fn test_public_id_is_deterministic() {
        let id = Uuid::nil();
        assert_eq!(
            ImageKind::Logo.public_id(id),
            "company-00000000-0000-0000-0000-000000000000-logo"
        );
        assert_eq!(ImageKind::Banner.public_id(id), ImageKind::Banner.public_id(id));
    }
}
