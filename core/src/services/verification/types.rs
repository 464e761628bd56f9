//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of sending a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The SMS message ID from the provider
    pub message_id: String,
    /// When the issued code stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// A pending challenge as held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    /// Hex SHA-256 of the phone number and code
    pub code_hash: String,
    /// Failed attempts so far
    pub attempts: u32,
}
