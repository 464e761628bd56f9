//! User repository trait defining the interface for the credential store.
//!
//! Implementations persist `User` records and enforce the uniqueness of
//! email and mobile number. The trait is async-first and uses Result types
//! for proper error handling.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use bizreg_core::repositories::UserRepository;
/// use bizreg_core::domain::entities::user::User;
/// use bizreg_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_email_or_mobile(&self, _: &str, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_by_mobile(&self, _: &str) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn find_by_id(&self, _: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn mark_mobile_verified(&self, _: &str) -> Result<Option<Uuid>, DomainError> { Ok(None) }
/// #   async fn mark_email_verified(&self, _: &str) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find any user holding this email OR this mobile number.
    ///
    /// Used as the single duplicate check before registration.
    async fn find_by_email_or_mobile(
        &self,
        email: &str,
        mobile_no: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by mobile number
    async fn find_by_mobile(&self, mobile_no: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user in the repository
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError::Conflict)` - Email or mobile already taken
    /// * `Err(DomainError)` - Creation failed
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Set `is_mobile_verified` on the user owning `mobile_no`
    ///
    /// # Returns
    /// * `Ok(Some(id))` - Id of the updated user
    /// * `Ok(None)` - No user with this mobile number
    async fn mark_mobile_verified(&self, mobile_no: &str) -> Result<Option<Uuid>, DomainError>;

    /// Set `is_email_verified` on the user owning `email`
    ///
    /// # Returns
    /// * `Ok(true)` - A user was updated
    /// * `Ok(false)` - No user with this email
    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError>;
}
