//! Company profile entity. Each user owns at most one profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::image::ImageKind;

/// Industry a company operates in (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Industry {
    Technology,
    Healthcare,
    Finance,
    Education,
    Manufacturing,
    Retail,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Consulting,
    #[serde(rename = "Media & Entertainment")]
    MediaEntertainment,
    Transportation,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 11] = [
        Industry::Technology,
        Industry::Healthcare,
        Industry::Finance,
        Industry::Education,
        Industry::Manufacturing,
        Industry::Retail,
        Industry::RealEstate,
        Industry::Consulting,
        Industry::MediaEntertainment,
        Industry::Transportation,
        Industry::Other,
    ];

    /// Display string, also used as the stored value
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::Technology => "Technology",
            Industry::Healthcare => "Healthcare",
            Industry::Finance => "Finance",
            Industry::Education => "Education",
            Industry::Manufacturing => "Manufacturing",
            Industry::Retail => "Retail",
            Industry::RealEstate => "Real Estate",
            Industry::Consulting => "Consulting",
            Industry::MediaEntertainment => "Media & Entertainment",
            Industry::Transportation => "Transportation",
            Industry::Other => "Other",
        }
    }
}

impl std::fmt::Display for Industry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Industry::ALL
            .iter()
            .copied()
            .find(|industry| industry.as_str() == s)
            .ok_or_else(|| format!("Invalid industry: {}", s))
    }
}

/// Editable attributes of a company profile, as submitted on create and update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDetails {
    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub website: Option<String>,
    pub industry: Industry,
    pub founded_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub social_links: Option<BTreeMap<String, String>>,
}

/// Company profile entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Unique identifier for the profile
    pub id: Uuid,

    /// The owning user; unique across profiles
    pub owner_id: Uuid,

    pub company_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub website: Option<String>,
    pub industry: Industry,
    pub founded_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub social_links: Option<BTreeMap<String, String>>,

    /// Durable URL of the uploaded logo
    pub logo_url: Option<String>,

    /// Durable URL of the uploaded banner
    pub banner_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompanyProfile {
    /// Creates a new profile for `owner_id` without images
    pub fn new(owner_id: Uuid, details: CompanyDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id,
            company_name: details.company_name,
            address: details.address,
            city: details.city,
            state: details.state,
            country: details.country,
            postal_code: details.postal_code,
            website: details.website,
            industry: details.industry,
            founded_date: details.founded_date,
            description: details.description,
            social_links: details.social_links,
            logo_url: None,
            banner_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every editable attribute. Absent optionals become `None`;
    /// image URLs are left untouched.
    pub fn replace_details(&mut self, details: CompanyDetails) {
        self.company_name = details.company_name;
        self.address = details.address;
        self.city = details.city;
        self.state = details.state;
        self.country = details.country;
        self.postal_code = details.postal_code;
        self.website = details.website;
        self.industry = details.industry;
        self.founded_date = details.founded_date;
        self.description = details.description;
        self.social_links = details.social_links;
        self.updated_at = Utc::now();
    }

    /// Sets exactly the URL field matching `kind`
    pub fn set_image_url(&mut self, kind: ImageKind, url: String) {
        match kind {
            ImageKind::Logo => self.logo_url = Some(url),
            ImageKind::Banner => self.banner_url = Some(url),
        }
        self.updated_at = Utc::now();
    }

    /// Current editable attributes
    pub fn details(&self) -> CompanyDetails {
        CompanyDetails {
            company_name: self.company_name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            country: self.country.clone(),
            postal_code: self.postal_code.clone(),
            website: self.website.clone(),
            industry: self.industry,
            founded_date: self.founded_date,
            description: self.description.clone(),
            social_links: self.social_links.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> CompanyDetails {
        CompanyDetails {
            company_name: "Acme".to_string(),
            address: "1 Main St".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            country: "India".to_string(),
            postal_code: "411001".to_string(),
            website: Some("https://acme.example".to_string()),
            industry: Industry::RealEstate,
            founded_date: NaiveDate::from_ymd_opt(2001, 4, 1),
            description: Some("Builders".to_string()),
            social_links: None,
        }
    }

    #[test]
    fn test_industry_serializes_display_names() {
        let json = serde_json::to_string(&Industry::MediaEntertainment).unwrap();
        assert_eq!(json, "\"Media & Entertainment\"");
        let parsed: Industry = serde_json::from_str("\"Real Estate\"").unwrap();
        assert_eq!(parsed, Industry::RealEstate);
        assert!(serde_json::from_str::<Industry>("\"Mining\"").is_err());
    }

    #[test]
    fn test_industry_from_str_round_trips_every_variant() {
        for industry in Industry::ALL {
            assert_eq!(industry.as_str().parse::<Industry>().unwrap(), industry);
        }
    }

    #[test]
    fn test_replace_details_nulls_absent_optionals() {
        let mut profile = CompanyProfile::new(Uuid::new_v4(), details());
        profile.set_image_url(ImageKind::Logo, "https://img/logo.png".to_string());

        let mut next = details();
        next.website = None;
        next.description = None;
        next.founded_date = None;
        profile.replace_details(next);

        assert_eq!(profile.website, None);
        assert_eq!(profile.description, None);
        assert_eq!(profile.founded_date, None);
        assert_eq!(profile.logo_url.as_deref(), Some("https://img/logo.png"));
    }

    #[test]
    fn test_set_image_url_touches_only_matching_field() {
        let mut profile = CompanyProfile::new(Uuid::new_v4(), details());
        profile.set_image_url(ImageKind::Banner, "https://img/banner.png".to_string());
        assert!(profile.logo_url.is_none());
        assert_eq!(profile.banner_url.as_deref(), Some("https://img/banner.png"));
    }
}
