//! User entity representing a registered account holder of the portal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Self-declared gender, stored as a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "m", alias = "male")]
    Male,
    #[serde(rename = "f", alias = "female")]
    Female,
    #[serde(rename = "o", alias = "other")]
    Other,
}

impl Gender {
    /// Storage code for the gender column
    pub fn as_code(&self) -> &'static str {
        match self {
            Gender::Male => "m",
            Gender::Female => "f",
            Gender::Other => "o",
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" => Ok(Gender::Male),
            "f" | "female" => Ok(Gender::Female),
            "o" | "other" => Ok(Gender::Other),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// How the account was created. Only email signup exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SignupType {
    #[default]
    #[serde(rename = "e")]
    Email,
}

impl SignupType {
    /// Storage code for the signup_type column
    pub fn as_code(&self) -> &'static str {
        match self {
            SignupType::Email => "e",
        }
    }
}

impl std::str::FromStr for SignupType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "e" => Ok(SignupType::Email),
            _ => Err(format!("Invalid signup type: {}", s)),
        }
    }
}

/// User entity representing a registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique login email
    pub email: String,

    /// bcrypt hash of the password; never leaves the service layer
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub full_name: String,

    pub gender: Gender,

    pub signup_type: SignupType,

    /// Unique mobile number used for OTP verification
    pub mobile_no: String,

    pub is_email_verified: bool,

    pub is_mobile_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, unverified User
    pub fn new(
        email: String,
        password_hash: String,
        full_name: String,
        gender: Gender,
        mobile_no: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name,
            gender,
            signup_type: SignupType::Email,
            mobile_no,
            is_email_verified: false,
            is_mobile_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Projection that is safe to return to clients
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            is_email_verified: self.is_email_verified,
            is_mobile_verified: self.is_mobile_verified,
        }
    }
}

/// Public view of a user returned by login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_email_verified: bool,
    pub is_mobile_verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "a@x.com".to_string(),
            "$2b$12$hash".to_string(),
            "Ann".to_string(),
            Gender::Female,
            "+911234567890".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_unverified() {
        let user = sample_user();
        assert!(!user.is_email_verified);
        assert!(!user.is_mobile_verified);
        assert_eq!(user.signup_type, SignupType::Email);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["gender"], "f");
        assert_eq!(json["signup_type"], "e");
    }

    #[test]
    fn test_gender_accepts_codes_and_words() {
        let g: Gender = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(g, Gender::Male);
        assert_eq!("o".parse::<Gender>().unwrap(), Gender::Other);
        assert!("x".parse::<Gender>().is_err());
    }

    #[test]
    fn test_public_projection() {
        let user = sample_user();
        let public = user.to_public();
        assert_eq!(public.id, user.id);
        assert_eq!(public.email, "a@x.com");
    }
}
