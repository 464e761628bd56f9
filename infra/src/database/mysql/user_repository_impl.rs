//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use bizreg_core::domain::entities::user::{Gender, SignupType, User};
use bizreg_core::errors::DomainError;
use bizreg_core::repositories::UserRepository;

use super::{map_write_error, parse_code, parse_uuid};
use crate::InfrastructureError;

const USER_COLUMNS: &str = r#"
    id, email, password_hash, full_name, gender, signup_type, mobile_no,
    is_email_verified, is_mobile_verified, created_at, updated_at
"#;

/// MySQL implementation of UserRepository
///
/// Ids are stored as CHAR(36). Email and mobile number carry unique keys, so
/// a racing duplicate insert surfaces as `DomainError::Conflict`.
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to User entity
    fn row_to_user(row: &MySqlRow) -> Result<User, InfrastructureError> {
        let id: String = row.try_get("id")?;
        let gender: String = row.try_get("gender")?;
        let signup_type: String = row.try_get("signup_type")?;

        Ok(User {
            id: parse_uuid("users.id", &id)?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            full_name: row.try_get("full_name")?,
            gender: parse_code::<Gender>("users.gender", &gender)?,
            signup_type: parse_code::<SignupType>("users.signup_type", &signup_type)?,
            mobile_no: row.try_get("mobile_no")?,
            is_email_verified: row.try_get("is_email_verified")?,
            is_mobile_verified: row.try_get("is_mobile_verified")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        })
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        binds: &[&str],
    ) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {} FROM users WHERE {} LIMIT 1", USER_COLUMNS, condition);
        let mut query = sqlx::query(&sql);
        for value in binds {
            query = query.bind(*value);
        }

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        match row {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ?", &[email]).await
    }

    async fn find_by_email_or_mobile(
        &self,
        email: &str,
        mobile_no: &str,
    ) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email = ? OR mobile_no = ?", &[email, mobile_no])
            .await
    }

    async fn find_by_mobile(&self, mobile_no: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("mobile_no = ?", &[mobile_no]).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let id = id.to_string();
        self.fetch_one_where("id = ?", &[id.as_str()]).await
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, email, password_hash, full_name, gender, signup_type, mobile_no,
                is_email_verified, is_mobile_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.full_name)
            .bind(user.gender.as_code())
            .bind(user.signup_type.as_code())
            .bind(&user.mobile_no)
            .bind(user.is_email_verified)
            .bind(user.is_mobile_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "User with this email or mobile number already exists"))?;

        Ok(user)
    }

    async fn mark_mobile_verified(&self, mobile_no: &str) -> Result<Option<Uuid>, DomainError> {
        let result = sqlx::query(
            "UPDATE users SET is_mobile_verified = TRUE, updated_at = ? WHERE mobile_no = ?",
        )
        .bind(Utc::now())
        .bind(mobile_no)
        .execute(&self.pool)
        .await
        .map_err(InfrastructureError::from)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Ok(self.find_by_mobile(mobile_no).await?.map(|user| user.id))
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE users SET is_email_verified = TRUE, updated_at = ? WHERE email = ?")
            .bind(Utc::now())
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(InfrastructureError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
