//! Tests for the Identity Toolkit client helpers

use bizreg_shared::config::IdentityConfig;

use crate::identity::client::{parse_api_error, FirebaseAuthClient, FirebaseError};

#[test]
fn test_client_requires_api_key() {
    assert!(FirebaseAuthClient::new(IdentityConfig::default()).is_err());
}

#[test]
fn test_endpoint_includes_key() {
    let client = FirebaseAuthClient::new(IdentityConfig {
        api_key: "k123".to_string(),
        ..Default::default()
    })
    .unwrap();

    assert_eq!(
        client.endpoint("accounts:signUp"),
        "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=k123"
    );
}

#[test]
fn test_parse_api_error_strips_detail() {
    let body = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters","errors":[]}}"#;

    match parse_api_error(400, body) {
        FirebaseError::Api { status, reason } => {
            assert_eq!(status, 400);
            assert_eq!(reason, "WEAK_PASSWORD");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_credential_rejection_codes() {
    for reason in ["EMAIL_NOT_FOUND", "INVALID_PASSWORD", "INVALID_LOGIN_CREDENTIALS"] {
        let body = format!(r#"{{"error":{{"code":400,"message":"{}"}}}}"#, reason);
        assert!(parse_api_error(400, &body).is_credential_rejection());
    }

    assert!(!parse_api_error(400, r#"{"error":{"code":400,"message":"EMAIL_EXISTS"}}"#)
        .is_credential_rejection());
    assert!(!parse_api_error(502, "<html>bad gateway</html>").is_credential_rejection());
}
