//! Company profile repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::company::{CompanyDetails, CompanyProfile};
use crate::domain::entities::image::ImageKind;
use crate::errors::DomainError;

/// Repository trait for CompanyProfile persistence operations
///
/// At most one profile exists per owner; implementations enforce this with a
/// unique constraint on the owner column.
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find the profile owned by `owner_id`
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<CompanyProfile>, DomainError>;

    /// Insert a new profile
    ///
    /// # Returns
    /// * `Ok(CompanyProfile)` - The stored profile
    /// * `Err(DomainError::Conflict)` - The owner already has a profile
    async fn create(&self, profile: CompanyProfile) -> Result<CompanyProfile, DomainError>;

    /// Replace every editable attribute of the owner's profile
    ///
    /// # Returns
    /// * `Ok(Some(CompanyProfile))` - The updated profile
    /// * `Ok(None)` - The owner has no profile
    async fn update_details(
        &self,
        owner_id: Uuid,
        details: CompanyDetails,
    ) -> Result<Option<CompanyProfile>, DomainError>;

    /// Set the logo or banner URL of a profile, leaving the other untouched
    async fn set_image_url(
        &self,
        profile_id: Uuid,
        kind: ImageKind,
        url: &str,
    ) -> Result<(), DomainError>;
}
