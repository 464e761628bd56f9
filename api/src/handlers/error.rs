//! Error to HTTP response mapping
//!
//! Every failure leaves the API as the standard envelope
//! `{success: false, message, error}`. Domain errors are mapped to a status
//! code and a machine-readable code here, in one place, so handlers can
//! simply use `?`.

use actix_web::{
    error::{JsonPayloadError, QueryPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse, ResponseError,
};
use bizreg_core::errors::{AuthError, DomainError, ProviderError, TokenError};
use bizreg_shared::{error_codes, ApiResponse};
use thiserror::Error;

/// Message returned for any rejected session token
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid token";

/// Errors produced by the HTTP layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Malformed body, query string or multipart stream
    #[error("{0}")]
    BadRequest(String),

    #[error("No file provided")]
    FileMissing,
}

impl ApiError {
    /// Status, machine code and client-facing message for this error
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                error_codes::VALIDATION_ERROR,
                message.clone(),
            ),
            ApiError::FileMissing => (
                StatusCode::BAD_REQUEST,
                error_codes::FILE_MISSING,
                self.to_string(),
            ),
            ApiError::Domain(error) => domain_parts(error),
        }
    }
}

fn domain_parts(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Validation { message } => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            message.clone(),
        ),
        DomainError::ValidationErr(e) => (
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            e.to_string(),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        ),
        DomainError::Conflict { message } => {
            (StatusCode::CONFLICT, error_codes::CONFLICT, message.clone())
        }
        DomainError::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            error_codes::UNAUTHORIZED,
            "User not authenticated".to_string(),
        ),
        DomainError::Auth(auth) => match auth {
            AuthError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                error_codes::UNAUTHORIZED,
                auth.to_string(),
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                error_codes::INVALID_CREDENTIALS,
                auth.to_string(),
            ),
            AuthError::InvalidOtp | AuthError::OtpExpired | AuthError::OtpAttemptsExceeded => (
                StatusCode::BAD_REQUEST,
                error_codes::OTP_INVALID,
                auth.to_string(),
            ),
        },
        DomainError::Token(TokenError::TokenGenerationFailed) => internal_parts(),
        DomainError::Token(_) => (
            StatusCode::UNAUTHORIZED,
            error_codes::TOKEN_INVALID,
            INVALID_TOKEN_MESSAGE.to_string(),
        ),
        DomainError::Provider(provider) => match provider {
            ProviderError::EmailAction { .. } => (
                StatusCode::BAD_REQUEST,
                error_codes::PROVIDER_ERROR,
                "Email verification failed".to_string(),
            ),
            ProviderError::Identity { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::PROVIDER_ERROR,
                "Identity provider request failed".to_string(),
            ),
            ProviderError::Otp { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::PROVIDER_ERROR,
                "Could not send OTP".to_string(),
            ),
            ProviderError::ImageHost { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::PROVIDER_ERROR,
                "Image upload failed".to_string(),
            ),
        },
        DomainError::Internal { .. } => internal_parts(),
    }
}

fn internal_parts() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_codes::INTERNAL_ERROR,
        "Internal server error".to_string(),
    )
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, code, event = "request_failed", "Request failed");
        } else {
            tracing::warn!(error = %self, code, status = status.as_u16(), event = "request_rejected", "Request rejected");
        }

        HttpResponse::build(status).json(ApiResponse::error(message, code))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field_errors = errors.field_errors();
        let mut fields: Vec<_> = field_errors.keys().copied().collect();
        fields.sort_unstable();

        let message = fields
            .first()
            .and_then(|field| {
                field_errors.get(field).and_then(|errs| errs.first()).map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .unwrap_or_else(|| "Invalid request".to_string());

        ApiError::BadRequest(message)
    }
}

/// Error handler for `web::JsonConfig`
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::ContentType => "Content type must be application/json".to_string(),
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            "Request body is too large".to_string()
        }
        other => format!("Invalid request body: {}", other),
    };
    ApiError::BadRequest(message).into()
}

/// Error handler for `web::QueryConfig`
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("Invalid query string: {}", err)).into()
}
