//! Main registration service implementation

use std::sync::Arc;

use tokio::sync::OnceCell;
use uuid::Uuid;

use bizreg_shared::utils::phone::{is_valid_mobile, mask_phone_number, normalize_phone_number};
use bizreg_shared::utils::validation::{mask_email, validators};

use crate::domain::entities::user::{Gender, User};
use crate::domain::value_objects::{LoginResponse, RegisteredAccount};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;

use super::config::RegistrationServiceConfig;
use super::password::{hash_password, verify_password};
use super::traits::{IdentityProvider, ProviderAccount};
use super::types::RegisterAccountInput;

/// Registration service for account creation, verification and login
///
/// The workflow is client-driven: the server keeps no step pointer, each
/// operation stands on its own and the flags on the user row record progress.
pub struct RegistrationService<U, I>
where
    U: UserRepository,
    I: IdentityProvider,
{
    /// User repository for the credential store
    user_repository: Arc<U>,
    /// External identity provider
    identity_provider: Arc<I>,
    /// Token service for session tokens
    token_service: Arc<TokenService>,
    /// Service configuration
    config: RegistrationServiceConfig,
    /// Hash verified against when the email is unknown, so that unknown
    /// users cost the same bcrypt work as wrong passwords
    dummy_hash: OnceCell<String>,
}

impl<U, I> RegistrationService<U, I>
where
    U: UserRepository,
    I: IdentityProvider,
{
    /// Create a new registration service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `identity_provider` - External identity provider adapter
    /// * `token_service` - Service for session token issuance
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        identity_provider: Arc<I>,
        token_service: Arc<TokenService>,
        config: RegistrationServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            identity_provider,
            token_service,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Create an account
    ///
    /// This method:
    /// 1. Validates every field locally
    /// 2. Rejects the request if the email OR the mobile number is taken
    /// 3. Registers the credential with the identity provider
    /// 4. Hashes the password and inserts the user row, deleting the
    ///    provider account again if this step fails
    /// 5. Asks the provider to send the email-verification link (best effort)
    /// 6. Issues the mobile OTP challenge
    ///
    /// # Returns
    ///
    /// * `Ok(RegisteredAccount)` - The new user's id, email and name
    /// * `Err(DomainError::ValidationErr)` - A field is missing or malformed
    /// * `Err(DomainError::Conflict)` - Email or mobile already registered
    /// * `Err(DomainError::Provider)` - Provider registration or OTP issue failed
    pub async fn register_account(
        &self,
        input: RegisterAccountInput,
    ) -> DomainResult<RegisteredAccount> {
        let email = input.email.trim().to_string();
        let full_name = input.full_name.trim().to_string();
        let mobile_no = normalize_phone_number(&input.mobile_no);
        let gender = self.validate_registration(&email, &input.password, &full_name, &input.gender, &mobile_no)?;

        let masked_email = mask_email(&email);
        let masked_phone = mask_phone_number(&mobile_no);

        if self
            .user_repository
            .find_by_email_or_mobile(&email, &mobile_no)
            .await?
            .is_some()
        {
            tracing::warn!(
                email = %masked_email,
                phone = %masked_phone,
                event = "registration_conflict",
                "Registration rejected: email or mobile already in use"
            );
            return Err(DomainError::Conflict {
                message: "User with this email or mobile number already exists".to_string(),
            });
        }

        let account = self
            .identity_provider
            .register_with_email(&email, &input.password)
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %masked_email,
                    error = %e,
                    event = "provider_registration_failed",
                    "Identity provider rejected registration"
                );
                e
            })?;

        let user = match self
            .insert_user(&email, &input.password, full_name, gender, &mobile_no)
            .await
        {
            Ok(user) => user,
            Err(e) => {
                tracing::error!(
                    email = %masked_email,
                    error = %e,
                    event = "user_insert_failed",
                    "Local insert failed after provider registration"
                );
                self.compensate_provider_account(&account, &masked_email).await;
                return Err(e);
            }
        };

        tracing::info!(
            user_id = %user.id,
            email = %masked_email,
            event = "user_registered",
            "User registered"
        );

        if self.config.send_email_verification {
            if let Err(e) = self.identity_provider.send_email_verification(&account).await {
                tracing::warn!(
                    user_id = %user.id,
                    error = %e,
                    event = "email_verification_send_failed",
                    "Could not send email verification"
                );
            }
        }

        self.identity_provider.send_otp(&mobile_no).await?;
        tracing::info!(user_id = %user.id, phone = %masked_phone, event = "otp_issued", "Mobile OTP issued");

        Ok(RegisteredAccount {
            user_id: user.id,
            email: user.email,
            full_name: user.full_name,
        })
    }

    /// Verify a mobile number with the OTP sent to it
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - Id of the user whose mobile is now verified
    /// * `Err(DomainError::ValidationErr)` - Missing field or OTP not six digits
    /// * `Err(DomainError::Auth)` - The provider rejected the OTP
    /// * `Err(DomainError::NotFound)` - No user has this mobile number
    pub async fn verify_mobile(&self, mobile_no: &str, otp: &str) -> DomainResult<Uuid> {
        let mobile_no = normalize_phone_number(mobile_no);
        let otp = otp.trim();

        require("mobile_no", &mobile_no)?;
        require("otp", otp)?;
        if !validators::is_valid_otp(otp) {
            return Err(ValidationError::PatternMismatch {
                field: "otp".to_string(),
            }
            .into());
        }

        let masked_phone = mask_phone_number(&mobile_no);

        self.identity_provider
            .verify_otp(&mobile_no, otp)
            .await
            .map_err(|e| {
                tracing::warn!(phone = %masked_phone, error = %e, event = "otp_rejected", "OTP rejected");
                e
            })?;

        let user_id = self
            .user_repository
            .mark_mobile_verified(&mobile_no)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        tracing::info!(user_id = %user_id, event = "mobile_verified", "Mobile number verified");
        Ok(user_id)
    }

    /// Re-issue the OTP for a registered, not yet verified mobile number
    ///
    /// # Returns
    ///
    /// * `Ok(())` - A new code was sent; any previous code is void
    /// * `Err(DomainError::NotFound)` - No user has this mobile number
    /// * `Err(DomainError::Conflict)` - The mobile number is already verified
    pub async fn resend_otp(&self, mobile_no: &str) -> DomainResult<()> {
        let mobile_no = normalize_phone_number(mobile_no);
        require("mobile_no", &mobile_no)?;

        let user = self
            .user_repository
            .find_by_mobile(&mobile_no)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        if user.is_mobile_verified {
            return Err(DomainError::Conflict {
                message: "Mobile number already verified".to_string(),
            });
        }

        self.identity_provider.send_otp(&mobile_no).await?;
        tracing::info!(user_id = %user.id, event = "otp_resent", "Mobile OTP re-issued");
        Ok(())
    }

    /// Confirm an email address with a provider action code
    ///
    /// # Returns
    ///
    /// * `Ok(())` - `is_email_verified` is now set for the user
    /// * `Err(DomainError::ValidationErr)` - Missing code or email, or the code
    ///   belongs to a different email
    /// * `Err(DomainError::Provider)` - The provider rejected the code
    /// * `Err(DomainError::NotFound)` - No user has this email
    pub async fn confirm_email(&self, action_code: &str, email: &str) -> DomainResult<()> {
        let action_code = action_code.trim();
        let email = email.trim();
        require("oobCode", action_code)?;
        require("email", email)?;

        let verified_email = self
            .identity_provider
            .apply_email_action_code(action_code)
            .await?;

        if let Some(verified_email) = verified_email {
            if !verified_email.eq_ignore_ascii_case(email) {
                tracing::warn!(
                    email = %mask_email(email),
                    event = "email_action_mismatch",
                    "Action code was issued for a different email"
                );
                return Err(DomainError::Validation {
                    message: "Verification link does not match this email".to_string(),
                });
            }
        }

        if !self.user_repository.mark_email_verified(email).await? {
            return Err(DomainError::not_found("User"));
        }

        tracing::info!(email = %mask_email(email), event = "email_verified", "Email verified");
        Ok(())
    }

    /// Log in with email and password
    ///
    /// Unknown email, wrong password and provider credential rejection all
    /// produce the same `AuthError::InvalidCredentials` and the same log
    /// event. Mobile and email verification are not required.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResponse)` - Session token plus public user fields
    /// * `Err(DomainError::ValidationErr)` - Missing email or password
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Bad credentials
    /// * `Err(DomainError::Provider)` - The provider could not be reached
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResponse> {
        let email = email.trim();
        require("email", email)?;
        require("password", password)?;

        let masked_email = mask_email(email);

        let user = self.user_repository.find_by_email(email).await?;
        let password_matches = match &user {
            Some(user) => verify_password(password, &user.password_hash).await?,
            None => {
                let dummy = self.dummy_hash().await?;
                verify_password(password, dummy).await?;
                false
            }
        };

        let user = match user {
            Some(user) if password_matches => user,
            _ => return Err(self.login_failed(&masked_email)),
        };

        match self.identity_provider.sign_in_with_email(email, password).await {
            Ok(_) => {}
            Err(DomainError::Auth(AuthError::InvalidCredentials)) => {
                return Err(self.login_failed(&masked_email));
            }
            Err(e) => {
                tracing::error!(
                    email = %masked_email,
                    error = %e,
                    event = "provider_login_failed",
                    "Identity provider sign-in failed"
                );
                return Err(e);
            }
        }

        let token = self.token_service.issue(user.id, &user.email)?;

        tracing::info!(user_id = %user.id, event = "login_success", "User logged in");

        Ok(LoginResponse {
            token,
            user: user.to_public(),
        })
    }

    fn validate_registration(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        gender: &str,
        mobile_no: &str,
    ) -> DomainResult<Gender> {
        require("email", email)?;
        require("password", password)?;
        require("full_name", full_name)?;
        require("gender", gender)?;
        require("mobile_no", mobile_no)?;

        if !validators::is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let password_len = password.chars().count();
        if password_len < self.config.password_min_length {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                min: self.config.password_min_length,
                actual: password_len,
            }
            .into());
        }

        if !validators::min_chars(full_name, self.config.full_name_min_length) {
            return Err(ValidationError::InvalidLength {
                field: "full_name".to_string(),
                min: self.config.full_name_min_length,
                actual: full_name.chars().count(),
            }
            .into());
        }

        if !is_valid_mobile(mobile_no) {
            return Err(ValidationError::PatternMismatch {
                field: "mobile_no".to_string(),
            }
            .into());
        }

        gender.parse::<Gender>().map_err(|_| {
            ValidationError::InvalidValue {
                field: "gender".to_string(),
            }
            .into()
        })
    }

    async fn insert_user(
        &self,
        email: &str,
        password: &str,
        full_name: String,
        gender: Gender,
        mobile_no: &str,
    ) -> DomainResult<User> {
        let password_hash = hash_password(password, self.config.bcrypt_cost).await?;
        let user = User::new(
            email.to_string(),
            password_hash,
            full_name,
            gender,
            mobile_no.to_string(),
        );
        self.user_repository.create(user).await
    }

    async fn compensate_provider_account(&self, account: &ProviderAccount, masked_email: &str) {
        match self.identity_provider.delete_account(account).await {
            Ok(()) => tracing::info!(
                email = %masked_email,
                event = "provider_account_rolled_back",
                "Deleted provider account after failed insert"
            ),
            Err(e) => tracing::error!(
                email = %masked_email,
                provider_uid = %account.uid,
                error = %e,
                event = "provider_rollback_failed",
                "Could not delete provider account; manual cleanup required"
            ),
        }
    }

    async fn dummy_hash(&self) -> DomainResult<&str> {
        let cost = self.config.bcrypt_cost;
        self.dummy_hash
            .get_or_try_init(|| async move {
                hash_password(&Uuid::new_v4().to_string(), cost).await
            })
            .await
            .map(String::as_str)
    }

    fn login_failed(&self, masked_email: &str) -> DomainError {
        tracing::warn!(email = %masked_email, event = "login_failed", "Login rejected");
        AuthError::InvalidCredentials.into()
    }
}

fn require(field: &str, value: &str) -> Result<(), ValidationError> {
    if validators::not_empty(value) {
        Ok(())
    } else {
        Err(ValidationError::RequiredField {
            field: field.to_string(),
        })
    }
}
