//! Mock implementation of CompanyRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::company::{CompanyDetails, CompanyProfile};
use crate::domain::entities::image::ImageKind;
use crate::errors::DomainError;

use super::trait_::CompanyRepository;

/// Mock company repository keyed by owner id
pub struct MockCompanyRepository {
    profiles: Arc<RwLock<HashMap<Uuid, CompanyProfile>>>,
}

impl MockCompanyRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MockCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyRepository for MockCompanyRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<CompanyProfile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&owner_id).cloned())
    }

    async fn create(&self, profile: CompanyProfile) -> Result<CompanyProfile, DomainError> {
        let mut profiles = self.profiles.write().await;

        if profiles.contains_key(&profile.owner_id) {
            return Err(DomainError::Conflict {
                message: "Company profile already exists".to_string(),
            });
        }

        profiles.insert(profile.owner_id, profile.clone());
        Ok(profile)
    }

    async fn update_details(
        &self,
        owner_id: Uuid,
        details: CompanyDetails,
    ) -> Result<Option<CompanyProfile>, DomainError> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&owner_id).map(|profile| {
            profile.replace_details(details);
            profile.clone()
        }))
    }

    async fn set_image_url(
        &self,
        profile_id: Uuid,
        kind: ImageKind,
        url: &str,
    ) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .values_mut()
            .find(|p| p.id == profile_id)
            .ok_or_else(|| DomainError::not_found("Company profile"))?;
        profile.set_image_url(kind, url.to_string());
        Ok(())
    }
}
