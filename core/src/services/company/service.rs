//! Main company service implementation

use std::sync::Arc;
use uuid::Uuid;

use bizreg_shared::utils::validation::validators;

use crate::domain::entities::company::{CompanyDetails, CompanyProfile};
use crate::domain::entities::image::{ImageKind, ImageUpload, UploadedImage};
use crate::domain::value_objects::CompanyRef;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::CompanyRepository;

use super::config::CompanyServiceConfig;
use super::traits::ImageHost;

/// Company service managing the single profile each user may own
pub struct CompanyService<C, H>
where
    C: CompanyRepository,
    H: ImageHost,
{
    /// Repository for company profiles
    company_repository: Arc<C>,
    /// External image host
    image_host: Arc<H>,
    /// Service configuration
    config: CompanyServiceConfig,
}

impl<C, H> CompanyService<C, H>
where
    C: CompanyRepository,
    H: ImageHost,
{
    /// Create a new company service
    pub fn new(company_repository: Arc<C>, image_host: Arc<H>, config: CompanyServiceConfig) -> Self {
        Self {
            company_repository,
            image_host,
            config,
        }
    }

    /// Create the owner's profile
    ///
    /// # Returns
    ///
    /// * `Ok(CompanyRef)` - Id and name of the new profile
    /// * `Err(DomainError::ValidationErr)` - A required field is blank or the
    ///   website is not an http(s) URL
    /// * `Err(DomainError::Conflict)` - The owner already has a profile
    pub async fn create(&self, owner_id: Uuid, details: CompanyDetails) -> DomainResult<CompanyRef> {
        let details = normalize_details(details)?;

        if self.company_repository.find_by_owner(owner_id).await?.is_some() {
            tracing::warn!(owner_id = %owner_id, event = "company_conflict", "Owner already has a company profile");
            return Err(DomainError::Conflict {
                message: "Company profile already exists for this user".to_string(),
            });
        }

        let profile = self
            .company_repository
            .create(CompanyProfile::new(owner_id, details))
            .await?;

        tracing::info!(
            owner_id = %owner_id,
            company_id = %profile.id,
            event = "company_created",
            "Company profile created"
        );

        Ok(CompanyRef {
            company_id: profile.id,
            company_name: profile.company_name,
        })
    }

    /// Fetch the owner's profile
    pub async fn get(&self, owner_id: Uuid) -> DomainResult<CompanyProfile> {
        self.company_repository
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Company profile"))
    }

    /// Replace every editable attribute of the owner's profile
    ///
    /// Optional fields left out of `details` are cleared. Logo and banner
    /// URLs are kept.
    pub async fn update(&self, owner_id: Uuid, details: CompanyDetails) -> DomainResult<CompanyRef> {
        let details = normalize_details(details)?;

        let profile = self
            .company_repository
            .update_details(owner_id, details)
            .await?
            .ok_or_else(|| DomainError::not_found("Company profile"))?;

        tracing::info!(
            owner_id = %owner_id,
            company_id = %profile.id,
            event = "company_updated",
            "Company profile updated"
        );

        Ok(CompanyRef {
            company_id: profile.id,
            company_name: profile.company_name,
        })
    }

    /// Upload the logo or banner for the owner's profile
    ///
    /// This method:
    /// 1. Loads the profile (`NotFound` before any file checks)
    /// 2. Checks the content type is an image
    /// 3. Checks the size against the kind's ceiling (inclusive)
    /// 4. Uploads under a deterministic id, replacing the previous image
    /// 5. Stores the returned URL in the matching column
    pub async fn upload_image(
        &self,
        owner_id: Uuid,
        kind: ImageKind,
        image: ImageUpload,
    ) -> DomainResult<UploadedImage> {
        let profile = self.get(owner_id).await?;

        if !image
            .content_type
            .to_ascii_lowercase()
            .starts_with(&self.config.image_content_type_prefix)
        {
            return Err(ValidationError::InvalidContentType {
                content_type: image.content_type,
            }
            .into());
        }

        let size = image.size();
        if size > kind.max_bytes() {
            tracing::warn!(
                company_id = %profile.id,
                kind = kind.as_str(),
                size,
                event = "image_too_large",
                "Image upload rejected"
            );
            return Err(ValidationError::FileTooLarge {
                max_bytes: kind.max_bytes(),
                actual: size,
            }
            .into());
        }

        let uploaded = self
            .image_host
            .upload(image, kind.folder(), &kind.public_id(profile.id))
            .await
            .map_err(|e| {
                tracing::error!(
                    company_id = %profile.id,
                    kind = kind.as_str(),
                    error = %e,
                    event = "image_upload_failed",
                    "Image host upload failed"
                );
                e
            })?;

        self.company_repository
            .set_image_url(profile.id, kind, &uploaded.url)
            .await?;

        tracing::info!(
            company_id = %profile.id,
            kind = kind.as_str(),
            size,
            event = "image_uploaded",
            "Company image uploaded"
        );

        Ok(uploaded)
    }
}

/// Trim text fields, turn blank optionals into `None` and validate
fn normalize_details(details: CompanyDetails) -> DomainResult<CompanyDetails> {
    let details = CompanyDetails {
        company_name: details.company_name.trim().to_string(),
        address: details.address.trim().to_string(),
        city: details.city.trim().to_string(),
        state: details.state.trim().to_string(),
        country: details.country.trim().to_string(),
        postal_code: details.postal_code.trim().to_string(),
        website: non_blank(details.website),
        industry: details.industry,
        founded_date: details.founded_date,
        description: non_blank(details.description),
        social_links: details.social_links.filter(|links| !links.is_empty()),
    };

    for (field, value) in [
        ("company_name", &details.company_name),
        ("address", &details.address),
        ("city", &details.city),
        ("state", &details.state),
        ("country", &details.country),
        ("postal_code", &details.postal_code),
    ] {
        if !validators::not_empty(value) {
            return Err(ValidationError::RequiredField {
                field: field.to_string(),
            }
            .into());
        }
    }

    if let Some(website) = &details.website {
        if !validators::is_valid_url(website) {
            return Err(ValidationError::InvalidUrl.into());
        }
    }

    Ok(details)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
