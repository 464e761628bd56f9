//! Configuration for the company service

/// Configuration for the company service
#[derive(Debug, Clone)]
pub struct CompanyServiceConfig {
    /// Accepted MIME type prefix for uploads
    pub image_content_type_prefix: String,
}

impl Default for CompanyServiceConfig {
    fn default() -> Self {
        Self {
            image_content_type_prefix: "image/".to_string(),
        }
    }
}
