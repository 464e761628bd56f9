//! Session token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token lifetime (90 days)
pub const SESSION_TOKEN_EXPIRY_DAYS: i64 = 90;

/// Claims structure for the session JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Email of the user at issue time
    pub email: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,
}

impl Claims {
    /// Creates claims for a session token
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's email
    /// * `issued_at` - Issue instant, taken from the service clock
    /// * `expiry_days` - Lifetime of the token
    pub fn new(user_id: Uuid, email: &str, issued_at: DateTime<Utc>, expiry_days: i64) -> Self {
        let expiry = issued_at + Duration::days(expiry_days);
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
        }
    }

    /// Whether the token is expired at `now`. A token is invalid from the
    /// `exp` second onwards.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Parses the subject back into a user id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// The identity a verified session token vouches for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub user_id: Uuid,
    pub email: String,
}
