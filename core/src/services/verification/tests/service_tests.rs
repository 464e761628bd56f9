//! Unit tests for the verification service

use std::sync::Arc;
use std::time::Duration;

use super::mocks::{MockCacheService, MockSmsService};
use crate::errors::{AuthError, DomainError, ProviderError};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

const PHONE: &str = "+911234567890";

type Service = VerificationService<MockSmsService, MockCacheService>;

fn create_service(sms_fail: bool) -> (Service, Arc<MockSmsService>, Arc<MockCacheService>) {
    let sms = Arc::new(MockSmsService::new(sms_fail));
    let cache = Arc::new(MockCacheService::new(false));
    let service = VerificationService::new(
        sms.clone(),
        cache.clone(),
        VerificationServiceConfig::default(),
    );
    (service, sms, cache)
}

#[tokio::test]
async fn test_send_stores_hash_not_code() {
    let (service, sms, cache) = create_service(false);

    service.send_verification_code(PHONE).await.unwrap();

    let code = sms.get_sent_code(PHONE).unwrap();
    let stored = cache.stored(PHONE).unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_ne!(stored.code_hash, code);
    assert_eq!(stored.code_hash, Service::hash_code(PHONE, &code));
}

#[tokio::test]
async fn test_correct_code_verifies_once() {
    let (service, sms, _) = create_service(false);
    service.send_verification_code(PHONE).await.unwrap();
    let code = sms.get_sent_code(PHONE).unwrap();

    assert!(service.verify_code(PHONE, &code).await.is_ok());

    let reused = service.verify_code(PHONE, &code).await;
    assert!(matches!(reused, Err(DomainError::Auth(AuthError::OtpExpired))));
}

#[tokio::test]
async fn test_wrong_code_is_rejected() {
    let (service, sms, cache) = create_service(false);
    service.send_verification_code(PHONE).await.unwrap();
    let code = sms.get_sent_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let result = service.verify_code(PHONE, wrong).await;

    assert!(matches!(result, Err(DomainError::Auth(AuthError::InvalidOtp))));
    assert_eq!(cache.stored(PHONE).unwrap().attempts, 1);
}

#[tokio::test]
async fn test_attempt_limit_discards_challenge() {
    let (service, sms, cache) = create_service(false);
    service.send_verification_code(PHONE).await.unwrap();
    let code = sms.get_sent_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    assert!(service.verify_code(PHONE, wrong).await.is_err());
    assert!(service.verify_code(PHONE, wrong).await.is_err());
    let third = service.verify_code(PHONE, wrong).await;

    assert!(matches!(third, Err(DomainError::Auth(AuthError::OtpAttemptsExceeded))));
    assert!(cache.stored(PHONE).is_none());

    // Even the right code is useless now
    assert!(service.verify_code(PHONE, &code).await.is_err());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_guesses_share_the_attempt_limit() {
    let sms = Arc::new(MockSmsService::new(false));
    let cache = Arc::new(MockCacheService::with_read_latency(Duration::from_millis(20)));
    let service = Arc::new(VerificationService::new(
        sms.clone(),
        cache.clone(),
        VerificationServiceConfig::default(),
    ));
    service.send_verification_code(PHONE).await.unwrap();
    let code = sms.get_sent_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    // Every wrong guess reads the challenge before any attempt lands
    let wrong_guesses: Vec<_> = (0..199)
        .map(|_| {
            let service = Arc::clone(&service);
            let guess = wrong.to_string();
            tokio::spawn(async move { service.verify_code(PHONE, &guess).await })
        })
        .collect();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let right_guess = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.verify_code(PHONE, &code).await })
    };

    let mut invalid = 0;
    for handle in wrong_guesses {
        match handle.await.unwrap() {
            Err(DomainError::Auth(AuthError::InvalidOtp)) => invalid += 1,
            Err(DomainError::Auth(AuthError::OtpAttemptsExceeded)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    // Only the first max_attempts guesses were compared at all
    assert_eq!(invalid, 2);
    assert!(right_guess.await.unwrap().is_err());
    assert!(cache.stored(PHONE).is_none());
}

#[tokio::test]
async fn test_correct_code_on_last_attempt_verifies() {
    let (service, sms, _) = create_service(false);
    service.send_verification_code(PHONE).await.unwrap();
    let code = sms.get_sent_code(PHONE).unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    assert!(matches!(
        service.verify_code(PHONE, wrong).await,
        Err(DomainError::Auth(AuthError::InvalidOtp))
    ));
    assert!(service.verify_code(PHONE, wrong).await.is_err());
    assert!(service.verify_code(PHONE, &code).await.is_ok());
}

#[tokio::test]
async fn test_resend_invalidates_previous_code() {
    let (service, sms, _) = create_service(false);
    service.send_verification_code(PHONE).await.unwrap();
    let first = sms.get_sent_code(PHONE).unwrap();
    service.send_verification_code(PHONE).await.unwrap();
    let second = sms.get_sent_code(PHONE).unwrap();

    if first != second {
        assert!(service.verify_code(PHONE, &first).await.is_err());
    }
    assert!(service.verify_code(PHONE, &second).await.is_ok());
}

#[tokio::test]
async fn test_sms_failure_is_provider_error() {
    let (service, _, _) = create_service(true);

    let result = service.send_verification_code(PHONE).await;

    assert!(matches!(result, Err(DomainError::Provider(ProviderError::Otp { .. }))));
}

#[tokio::test]
async fn test_no_challenge_is_expired() {
    let (service, _, _) = create_service(false);
    let result = service.verify_code(PHONE, "123456").await;
    assert!(matches!(result, Err(DomainError::Auth(AuthError::OtpExpired))));
}

#[test]
fn test_generate_secure_code_length() {
    for length in [4, 6, 8] {
        let code = Service::generate_secure_code(length);
        assert_eq!(code.len(), length);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }
}
