//! Request bodies for the company routes

use std::collections::BTreeMap;

use bizreg_core::domain::entities::company::{CompanyDetails, Industry};
use bizreg_core::errors::{DomainError, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of POST /api/company/register and PUT /api/company/profile
///
/// Column widths are enforced here; presence and format rules live in the
/// company service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CompanyRequest {
    #[validate(length(max = 255, message = "company_name must be at most 255 characters"))]
    pub company_name: String,
    pub address: String,
    #[validate(length(max = 100, message = "city must be at most 100 characters"))]
    pub city: String,
    #[validate(length(max = 100, message = "state must be at most 100 characters"))]
    pub state: String,
    #[validate(length(max = 100, message = "country must be at most 100 characters"))]
    pub country: String,
    #[validate(length(max = 20, message = "postal_code must be at most 20 characters"))]
    pub postal_code: String,
    #[validate(length(max = 255, message = "website must be at most 255 characters"))]
    pub website: Option<String>,
    pub industry: String,
    /// `YYYY-MM-DD`; blank means absent
    pub founded_date: Option<String>,
    pub description: Option<String>,
    pub social_links: Option<BTreeMap<String, String>>,
}

impl CompanyRequest {
    /// Convert into domain details, parsing the industry and founding date
    pub fn into_details(self) -> Result<CompanyDetails, DomainError> {
        let industry = parse_industry(&self.industry)?;
        let founded_date = parse_founded_date(self.founded_date.as_deref())?;

        Ok(CompanyDetails {
            company_name: self.company_name,
            address: self.address,
            city: self.city,
            state: self.state,
            country: self.country,
            postal_code: self.postal_code,
            website: self.website,
            industry,
            founded_date,
            description: self.description,
            social_links: self.social_links,
        })
    }
}

fn parse_industry(value: &str) -> Result<Industry, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "industry".to_string(),
        }
        .into());
    }
    value.parse::<Industry>().map_err(|_| {
        ValidationError::InvalidValue {
            field: "industry".to_string(),
        }
        .into()
    })
}

fn parse_founded_date(value: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ValidationError::InvalidValue {
                    field: "founded_date".to_string(),
                }
                .into()
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompanyRequest {
        serde_json::from_value(serde_json::json!({
            "company_name": "Acme",
            "address": "1 Main St",
            "city": "Pune",
            "state": "MH",
            "country": "India",
            "postal_code": "411001",
            "industry": "Real Estate",
            "founded_date": "2001-04-01"
        }))
        .unwrap()
    }

    #[test]
    fn test_into_details_parses_industry_and_date() {
        let details = request().into_details().unwrap();
        assert_eq!(details.industry, Industry::RealEstate);
        assert_eq!(details.founded_date, NaiveDate::from_ymd_opt(2001, 4, 1));
        assert!(details.website.is_none());
    }

    #[test]
    fn test_blank_founded_date_is_absent() {
        let mut req = request();
        req.founded_date = Some("  ".to_string());
        assert_eq!(req.into_details().unwrap().founded_date, None);
    }

    #[test]
    fn test_invalid_industry_and_date_are_validation_errors() {
        let mut req = request();
        req.industry = "Mining".to_string();
        assert!(req.into_details().unwrap_err().is_validation());

        let mut req = request();
        req.industry = String::new();
        assert!(req.into_details().unwrap_err().is_validation());

        let mut req = request();
        req.founded_date = Some("01/04/2001".to_string());
        assert!(req.into_details().unwrap_err().is_validation());
    }

    #[test]
    fn test_column_width_limits() {
        let mut req = request();
        req.postal_code = "9".repeat(21);
        assert!(req.validate().is_err());
        assert!(request().validate().is_ok());
    }
}
