//! Column conversions shared by the MySQL repositories

use std::str::FromStr;

use bizreg_core::errors::DomainError;
use uuid::Uuid;

use crate::InfrastructureError;

/// Parse a CHAR(36) id column
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, InfrastructureError> {
    Uuid::parse_str(value)
        .map_err(|e| InfrastructureError::Mapping(format!("Invalid UUID in {}: {}", column, e)))
}

/// Parse a coded column (gender, signup type, industry)
pub(crate) fn parse_code<T>(column: &str, value: &str) -> Result<T, InfrastructureError>
where
    T: FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| InfrastructureError::Mapping(format!("{} in {}", e, column)))
}

/// Map an INSERT/UPDATE failure, turning unique-key violations into `Conflict`
pub(crate) fn map_write_error(error: sqlx::Error, conflict_message: &str) -> DomainError {
    let is_duplicate = error
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);

    if is_duplicate {
        DomainError::Conflict {
            message: conflict_message.to_string(),
        }
    } else {
        tracing::error!(error = %error, "Database write failed");
        InfrastructureError::Database(error).into()
    }
}
