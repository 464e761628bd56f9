//! MySQL implementation of the CompanyRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{mysql::MySqlRow, types::Json, MySqlPool, Row};
use std::collections::BTreeMap;
use uuid::Uuid;

use bizreg_core::domain::entities::company::{CompanyDetails, CompanyProfile, Industry};
use bizreg_core::domain::entities::image::ImageKind;
use bizreg_core::errors::DomainError;
use bizreg_core::repositories::CompanyRepository;

use super::{map_write_error, parse_code, parse_uuid};
use crate::InfrastructureError;

const COMPANY_COLUMNS: &str = r#"
    id, owner_id, company_name, address, city, state, country, postal_code,
    website, logo_url, banner_url, industry, founded_date, description,
    social_links, created_at, updated_at
"#;

/// MySQL implementation of CompanyRepository
///
/// `owner_id` carries a unique key; `social_links` is a JSON column.
pub struct MySqlCompanyRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlCompanyRepository {
    /// Create a new MySQL company repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_profile(row: &MySqlRow) -> Result<CompanyProfile, InfrastructureError> {
        let id: String = row.try_get("id")?;
        let owner_id: String = row.try_get("owner_id")?;
        let industry: String = row.try_get("industry")?;
        let social_links: Option<Json<BTreeMap<String, String>>> = row.try_get("social_links")?;

        Ok(CompanyProfile {
            id: parse_uuid("company_profile.id", &id)?,
            owner_id: parse_uuid("company_profile.owner_id", &owner_id)?,
            company_name: row.try_get("company_name")?,
            address: row.try_get("address")?,
            city: row.try_get("city")?,
            state: row.try_get("state")?,
            country: row.try_get("country")?,
            postal_code: row.try_get("postal_code")?,
            website: row.try_get("website")?,
            industry: parse_code::<Industry>("company_profile.industry", &industry)?,
            founded_date: row.try_get::<Option<NaiveDate>, _>("founded_date")?,
            description: row.try_get("description")?,
            social_links: social_links.map(|Json(links)| links),
            logo_url: row.try_get("logo_url")?,
            banner_url: row.try_get("banner_url")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }
}

#[async_trait]
impl CompanyRepository for MySqlCompanyRepository {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<CompanyProfile>, DomainError> {
        let sql = format!(
            "SELECT {} FROM company_profile WHERE owner_id = ? LIMIT 1",
            COMPANY_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_profile(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, profile: CompanyProfile) -> Result<CompanyProfile, DomainError> {
        let query = r#"
            INSERT INTO company_profile (
                id, owner_id, company_name, address, city, state, country, postal_code,
                website, logo_url, banner_url, industry, founded_date, description,
                social_links, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(profile.id.to_string())
            .bind(profile.owner_id.to_string())
            .bind(&profile.company_name)
            .bind(&profile.address)
            .bind(&profile.city)
            .bind(&profile.state)
            .bind(&profile.country)
            .bind(&profile.postal_code)
            .bind(&profile.website)
            .bind(&profile.logo_url)
            .bind(&profile.banner_url)
            .bind(profile.industry.as_str())
            .bind(profile.founded_date)
            .bind(&profile.description)
            .bind(profile.social_links.as_ref().map(Json))
            .bind(profile.created_at)
            .bind(profile.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Company profile already exists for this user"))?;

        Ok(profile)
    }

    async fn update_details(
        &self,
        owner_id: Uuid,
        details: CompanyDetails,
    ) -> Result<Option<CompanyProfile>, DomainError> {
        let query = r#"
            UPDATE company_profile SET
                company_name = ?, address = ?, city = ?, state = ?, country = ?,
                postal_code = ?, website = ?, industry = ?, founded_date = ?,
                description = ?, social_links = ?, updated_at = ?
            WHERE owner_id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&details.company_name)
            .bind(&details.address)
            .bind(&details.city)
            .bind(&details.state)
            .bind(&details.country)
            .bind(&details.postal_code)
            .bind(&details.website)
            .bind(details.industry.as_str())
            .bind(details.founded_date)
            .bind(&details.description)
            .bind(details.social_links.as_ref().map(Json))
            .bind(Utc::now())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_owner(owner_id).await
    }

    async fn set_image_url(
        &self,
        profile_id: Uuid,
        kind: ImageKind,
        url: &str,
    ) -> Result<(), DomainError> {
        let query = match kind {
            ImageKind::Logo => "UPDATE company_profile SET logo_url = ?, updated_at = ? WHERE id = ?",
            ImageKind::Banner => {
                "UPDATE company_profile SET banner_url = ?, updated_at = ? WHERE id = ?"
            }
        };

        let result = sqlx::query(query)
            .bind(url)
            .bind(Utc::now())
            .bind(profile_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Company profile"));
        }
        Ok(())
    }
}
