//! Value objects returned by the registration workflow and company service.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::PublicUser;

/// Successful login: a session token plus the public user fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    /// Bearer session token (JWT)
    pub token: String,

    /// Public projection of the authenticated user
    pub user: PublicUser,
}

/// Outcome of account registration. No session token is issued at this step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisteredAccount {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
}

/// Identifies a company profile after create or update
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyRef {
    pub company_id: Uuid,
    pub company_name: String,
}
