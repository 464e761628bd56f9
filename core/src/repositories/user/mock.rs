//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    fail_create: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            fail_create: AtomicBool::new(false),
        }
    }

    /// Make every subsequent `create` fail with an internal error
    pub fn fail_on_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_mobile(
        &self,
        email: &str,
        mobile_no: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email == email || u.mobile_no == mobile_no)
            .cloned())
    }

    async fn find_by_mobile(&self, mobile_no: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.mobile_no == mobile_no).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Simulated insert failure".to_string(),
            });
        }

        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email == user.email || u.mobile_no == user.mobile_no)
        {
            return Err(DomainError::Conflict {
                message: "User with this email or mobile number already exists".to_string(),
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn mark_mobile_verified(&self, mobile_no: &str) -> Result<Option<Uuid>, DomainError> {
        let mut users = self.users.write().await;
        Ok(users
            .values_mut()
            .find(|u| u.mobile_no == mobile_no)
            .map(|u| {
                u.is_mobile_verified = true;
                u.updated_at = Utc::now();
                u.id
            }))
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.values_mut().find(|u| u.email == email) {
            Some(user) => {
                user.is_email_verified = true;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
