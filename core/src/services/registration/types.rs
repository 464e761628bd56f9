//! Input types for the registration workflow

use serde::{Deserialize, Serialize};

/// Fields submitted to create an account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterAccountInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    /// `m`, `f` or `o` (also `male`, `female`, `other`)
    pub gender: String,
    pub mobile_no: String,
}
