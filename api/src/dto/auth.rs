//! Request and response bodies for the authentication routes

use bizreg_core::domain::entities::user::SignupType;
use bizreg_core::services::registration::RegisterAccountInput;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// POST /api/auth/register
///
/// Fields default to empty so a missing field is reported by the
/// registration workflow as "is required" rather than as a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(max = 255, message = "email must be at most 255 characters"))]
    pub email: String,
    #[validate(length(max = 128, message = "password must be at most 128 characters"))]
    pub password: String,
    #[validate(length(max = 255, message = "full_name must be at most 255 characters"))]
    pub full_name: String,
    pub gender: String,
    #[validate(length(max = 20, message = "mobile_no must be at most 20 characters"))]
    pub mobile_no: String,
    /// Only email signup (`"e"`) exists
    pub signup_type: Option<SignupType>,
}

impl From<RegisterRequest> for RegisterAccountInput {
    fn from(request: RegisterRequest) -> Self {
        RegisterAccountInput {
            email: request.email,
            password: request.password,
            full_name: request.full_name,
            gender: request.gender,
            mobile_no: request.mobile_no,
        }
    }
}

/// POST /api/auth/login
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// GET /api/auth/verify-email query string, as produced by the provider's
/// verification link
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyEmailQuery {
    #[serde(rename = "oobCode")]
    pub oob_code: String,
    pub email: String,
}

/// POST /api/auth/verify-mobile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyMobileRequest {
    pub mobile_no: String,
    pub otp: String,
}

/// POST /api/auth/resend-otp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResendOtpRequest {
    pub mobile_no: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyMobileResponse {
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(request.email, "a@x.com");
        assert!(request.password.is_empty());
        assert!(request.signup_type.is_none());
    }

    #[test]
    fn test_register_request_rejects_unknown_signup_type() {
        assert!(serde_json::from_str::<RegisterRequest>(r#"{"signup_type":"g"}"#).is_err());
        let request: RegisterRequest = serde_json::from_str(r#"{"signup_type":"e"}"#).unwrap();
        assert_eq!(request.signup_type, Some(SignupType::Email));
    }

    #[test]
    fn test_register_request_length_limits() {
        let request = RegisterRequest {
            mobile_no: "1".repeat(21),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(RegisterRequest::default().validate().is_ok());
    }

    #[test]
    fn test_verify_email_query_uses_provider_parameter_name() {
        let query: VerifyEmailQuery =
            serde_json::from_str(r#"{"oobCode":"abc","email":"a@x.com"}"#).unwrap();
        assert_eq!(query.oob_code, "abc");
    }
}
