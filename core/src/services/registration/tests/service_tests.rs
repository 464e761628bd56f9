//! Unit tests for the registration workflow

use std::sync::Arc;

use crate::errors::{AuthError, DomainError, ProviderError, ValidationError};
use crate::repositories::{MockUserRepository, UserRepository};
use crate::services::registration::{
    IdentityProvider, MockIdentityProvider, RegisterAccountInput, RegistrationService, RegistrationServiceConfig,
};
use crate::services::token::{TokenService, TokenServiceConfig};

const EMAIL: &str = "a@x.com";
const PASSWORD: &str = "secret123";
const MOBILE: &str = "+911234567890";

type Service = RegistrationService<MockUserRepository, MockIdentityProvider>;

struct Fixture {
    service: Service,
    users: Arc<MockUserRepository>,
    provider: Arc<MockIdentityProvider>,
    tokens: Arc<TokenService>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let provider = Arc::new(MockIdentityProvider::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()));
    let config = RegistrationServiceConfig {
        bcrypt_cost: 4,
        ..Default::default()
    };
    let service = RegistrationService::new(users.clone(), provider.clone(), tokens.clone(), config);
    Fixture {
        service,
        users,
        provider,
        tokens,
    }
}

fn input(email: &str, mobile_no: &str) -> RegisterAccountInput {
    RegisterAccountInput {
        email: email.to_string(),
        password: PASSWORD.to_string(),
        full_name: "Ann Lee".to_string(),
        gender: "f".to_string(),
        mobile_no: mobile_no.to_string(),
    }
}

#[tokio::test]
async fn test_register_creates_unverified_user_and_issues_otp() {
    let f = fixture();

    let account = f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    assert_eq!(account.email, EMAIL);
    assert_eq!(account.full_name, "Ann Lee");

    let user = f.users.find_by_id(account.user_id).await.unwrap().unwrap();
    assert!(!user.is_email_verified);
    assert!(!user.is_mobile_verified);
    assert_ne!(user.password_hash, PASSWORD);
    assert!(f.provider.has_account(EMAIL));
    assert!(f.provider.issued_otp(MOBILE).is_some());
}

#[tokio::test]
async fn test_register_normalizes_mobile_number() {
    let f = fixture();

    f.service
        .register_account(input(EMAIL, "+91 12345-67890"))
        .await
        .unwrap();

    assert!(f.users.find_by_mobile(MOBILE).await.unwrap().is_some());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email_or_mobile() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    let same_email = f.service.register_account(input(EMAIL, "+14155552671")).await;
    assert!(matches!(same_email, Err(DomainError::Conflict { .. })));

    let same_mobile = f.service.register_account(input("b@x.com", MOBILE)).await;
    assert!(matches!(same_mobile, Err(DomainError::Conflict { .. })));

    assert_eq!(f.users.count().await, 1);
}

#[tokio::test]
async fn test_register_validates_fields() {
    let f = fixture();

    let mut missing_name = input(EMAIL, MOBILE);
    missing_name.full_name = "   ".to_string();
    let result = f.service.register_account(missing_name).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { ref field })) if field == "full_name"
    ));

    let result = f.service.register_account(input("not-an-email", MOBILE)).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let mut short_password = input(EMAIL, MOBILE);
    short_password.password = "short".to_string();
    let result = f.service.register_account(short_password).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::InvalidLength { .. }))
    ));

    let mut bad_gender = input(EMAIL, MOBILE);
    bad_gender.gender = "x".to_string();
    let result = f.service.register_account(bad_gender).await;
    assert!(result.unwrap_err().is_validation());

    assert_eq!(f.users.count().await, 0);
    assert!(!f.provider.has_account(EMAIL));
}

#[tokio::test]
async fn test_provider_rejection_leaves_no_local_row() {
    let f = fixture();
    f.provider.reject_registrations(true);

    let result = f.service.register_account(input(EMAIL, MOBILE)).await;

    assert!(matches!(
        result,
        Err(DomainError::Provider(ProviderError::Identity { .. }))
    ));
    assert_eq!(f.users.count().await, 0);
}

#[tokio::test]
async fn test_failed_insert_deletes_provider_account() {
    let f = fixture();
    f.users.fail_on_create(true);

    let result = f.service.register_account(input(EMAIL, MOBILE)).await;

    assert!(result.is_err());
    assert_eq!(f.provider.deleted_accounts().len(), 1);
    assert!(!f.provider.has_account(EMAIL));
    assert!(f.provider.issued_otp(MOBILE).is_none());
}

#[tokio::test]
async fn test_login_right_after_register_without_verification() {
    let f = fixture();
    let account = f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    let login = f.service.login(EMAIL, PASSWORD).await.unwrap();

    assert_eq!(login.user.id, account.user_id);
    assert_eq!(login.user.email, EMAIL);
    assert!(!login.user.is_mobile_verified);

    let identity = f.tokens.verify(&login.token).unwrap();
    assert_eq!(identity.user_id, account.user_id);
    assert_eq!(identity.email, EMAIL);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_fail_identically() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    let wrong_password = f.service.login(EMAIL, "wrong-password").await.unwrap_err();
    let unknown_email = f.service.login("nobody@x.com", PASSWORD).await.unwrap_err();

    assert!(matches!(
        wrong_password,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert!(matches!(
        unknown_email,
        DomainError::Auth(AuthError::InvalidCredentials)
    ));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn test_provider_credential_rejection_is_invalid_credentials() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();
    f.provider.set_password(EMAIL, "changed-elsewhere");

    let result = f.service.login(EMAIL, PASSWORD).await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let f = fixture();

    let result = f.service.login("", PASSWORD).await;
    assert!(result.unwrap_err().is_validation());

    let result = f.service.login(EMAIL, "").await;
    assert!(result.unwrap_err().is_validation());
}

#[tokio::test]
async fn test_verify_mobile_with_issued_otp() {
    let f = fixture();
    let account = f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();
    let otp = f.provider.issued_otp(MOBILE).unwrap();

    let user_id = f.service.verify_mobile(MOBILE, &otp).await.unwrap();

    assert_eq!(user_id, account.user_id);
    let user = f.users.find_by_id(user_id).await.unwrap().unwrap();
    assert!(user.is_mobile_verified);
    assert!(!user.is_email_verified);
}

#[tokio::test]
async fn test_verify_mobile_rejects_malformed_otp() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    let result = f.service.verify_mobile(MOBILE, "12a45").await;

    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::PatternMismatch { ref field })) if field == "otp"
    ));
}

#[tokio::test]
async fn test_verify_mobile_wrong_otp() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();
    let otp = f.provider.issued_otp(MOBILE).unwrap();
    let wrong = if otp == "000000" { "111111" } else { "000000" };

    let result = f.service.verify_mobile(MOBILE, wrong).await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidOtp))));
}

#[tokio::test]
async fn test_verify_mobile_unknown_number_is_not_found() {
    let f = fixture();
    // The provider accepts the code, but no local user owns the number
    f.provider.send_otp(MOBILE).await.unwrap();
    let otp = f.provider.issued_otp(MOBILE).unwrap();

    let result = f.service.verify_mobile(MOBILE, &otp).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_resend_otp_replaces_code() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    f.service.resend_otp(MOBILE).await.unwrap();
    let otp = f.provider.issued_otp(MOBILE).unwrap();

    assert!(f.service.verify_mobile(MOBILE, &otp).await.is_ok());
}

#[tokio::test]
async fn test_resend_otp_conflict_when_verified() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();
    let otp = f.provider.issued_otp(MOBILE).unwrap();
    f.service.verify_mobile(MOBILE, &otp).await.unwrap();

    let result = f.service.resend_otp(MOBILE).await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
}

#[tokio::test]
async fn test_resend_otp_unknown_number() {
    let f = fixture();

    let result = f.service.resend_otp(MOBILE).await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_confirm_email_sets_flag() {
    let f = fixture();
    let account = f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();
    let code = f.provider.issue_action_code(EMAIL);

    f.service.confirm_email(&code, EMAIL).await.unwrap();

    let user = f.users.find_by_id(account.user_id).await.unwrap().unwrap();
    assert!(user.is_email_verified);
}

#[tokio::test]
async fn test_confirm_email_rejects_code_for_other_email() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();
    let code = f.provider.issue_action_code("b@x.com");

    let result = f.service.confirm_email(&code, EMAIL).await;

    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_confirm_email_invalid_code() {
    let f = fixture();
    f.service.register_account(input(EMAIL, MOBILE)).await.unwrap();

    let result = f.service.confirm_email("bogus", EMAIL).await;
    assert!(matches!(
        result,
        Err(DomainError::Provider(ProviderError::EmailAction { .. }))
    ));

    let result = f.service.confirm_email("", EMAIL).await;
    assert!(result.unwrap_err().is_validation());
}
