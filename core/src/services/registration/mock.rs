//! In-memory identity provider for tests

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::errors::{AuthError, DomainError, DomainResult, ProviderError};

use super::traits::{IdentityProvider, ProviderAccount};

/// Mock identity provider
///
/// Keeps accounts and issued OTPs in memory. Tests read the last OTP issued
/// to a number with [`MockIdentityProvider::issued_otp`] and can make
/// registration fail with [`MockIdentityProvider::reject_registrations`].
#[derive(Default)]
pub struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, (String, String)>>,
    otps: Mutex<HashMap<String, String>>,
    action_codes: Mutex<HashMap<String, String>>,
    deleted: Mutex<Vec<String>>,
    reject_registration: AtomicBool,
    fail_otp_delivery: AtomicBool,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent registration fail
    pub fn reject_registrations(&self, reject: bool) {
        self.reject_registration.store(reject, Ordering::SeqCst);
    }

    /// Make every subsequent OTP issue fail
    pub fn fail_otp_delivery(&self, fail: bool) {
        self.fail_otp_delivery.store(fail, Ordering::SeqCst);
    }

    /// The pending OTP for a mobile number
    pub fn issued_otp(&self, mobile_no: &str) -> Option<String> {
        self.otps.lock().ok()?.get(mobile_no).cloned()
    }

    /// Whether the provider holds an account for this email
    pub fn has_account(&self, email: &str) -> bool {
        self.accounts
            .lock()
            .map(|accounts| accounts.contains_key(email))
            .unwrap_or(false)
    }

    /// Provider uids deleted through compensation
    pub fn deleted_accounts(&self) -> Vec<String> {
        self.deleted.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Create an email action code as if a verification email had been sent
    pub fn issue_action_code(&self, email: &str) -> String {
        let code = Uuid::new_v4().simple().to_string();
        if let Ok(mut codes) = self.action_codes.lock() {
            codes.insert(code.clone(), email.to_string());
        }
        code
    }

    /// Change the stored provider password (simulates drift between stores)
    pub fn set_password(&self, email: &str, password: &str) {
        if let Ok(mut accounts) = self.accounts.lock() {
            if let Some(entry) = accounts.get_mut(email) {
                entry.1 = password.to_string();
            }
        }
    }

    fn poisoned() -> DomainError {
        DomainError::internal("mock identity provider lock poisoned")
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn register_with_email(&self, email: &str, password: &str) -> DomainResult<ProviderAccount> {
        if self.reject_registration.load(Ordering::SeqCst) {
            return Err(ProviderError::Identity {
                message: "registration rejected".to_string(),
            }
            .into());
        }
        let mut accounts = self.accounts.lock().map_err(|_| Self::poisoned())?;
        if accounts.contains_key(email) {
            return Err(ProviderError::Identity {
                message: "EMAIL_EXISTS".to_string(),
            }
            .into());
        }
        let uid = Uuid::new_v4().to_string();
        accounts.insert(email.to_string(), (uid.clone(), password.to_string()));
        Ok(ProviderAccount {
            id_token: format!("id-token-{}", uid),
            uid,
        })
    }

    async fn sign_in_with_email(&self, email: &str, password: &str) -> DomainResult<ProviderAccount> {
        let accounts = self.accounts.lock().map_err(|_| Self::poisoned())?;
        match accounts.get(email) {
            Some((uid, stored)) if stored == password => Ok(ProviderAccount {
                uid: uid.clone(),
                id_token: format!("id-token-{}", uid),
            }),
            _ => Err(AuthError::InvalidCredentials.into()),
        }
    }

    async fn send_email_verification(&self, _account: &ProviderAccount) -> DomainResult<()> {
        Ok(())
    }

    async fn apply_email_action_code(&self, action_code: &str) -> DomainResult<Option<String>> {
        let mut codes = self.action_codes.lock().map_err(|_| Self::poisoned())?;
        codes.remove(action_code).map(Some).ok_or_else(|| {
            ProviderError::EmailAction {
                message: "INVALID_OOB_CODE".to_string(),
            }
            .into()
        })
    }

    async fn delete_account(&self, account: &ProviderAccount) -> DomainResult<()> {
        let mut accounts = self.accounts.lock().map_err(|_| Self::poisoned())?;
        accounts.retain(|_, (uid, _)| uid != &account.uid);
        if let Ok(mut deleted) = self.deleted.lock() {
            deleted.push(account.uid.clone());
        }
        Ok(())
    }

    async fn send_otp(&self, mobile_no: &str) -> DomainResult<()> {
        if self.fail_otp_delivery.load(Ordering::SeqCst) {
            return Err(ProviderError::Otp {
                message: "delivery failed".to_string(),
            }
            .into());
        }
        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000u32));
        self.otps
            .lock()
            .map_err(|_| Self::poisoned())?
            .insert(mobile_no.to_string(), code);
        Ok(())
    }

    async fn verify_otp(&self, mobile_no: &str, otp: &str) -> DomainResult<()> {
        let mut otps = self.otps.lock().map_err(|_| Self::poisoned())?;
        match otps.get(mobile_no) {
            Some(code) if code == otp => {
                otps.remove(mobile_no);
                Ok(())
            }
            Some(_) => Err(AuthError::InvalidOtp.into()),
            None => Err(AuthError::OtpExpired.into()),
        }
    }
}
