//! Tests for the Twilio SMS service

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::sms::sms_service::verification_message;
use crate::sms::twilio::{TwilioConfig, TwilioSmsService};
use crate::sms::SmsService;
use crate::InfrastructureError;

/// Local HTTP endpoint answering every request with 503, counting requests
async fn unavailable_endpoint() -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&requests);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let mut buffer = [0u8; 4096];
            let _ = socket.read(&mut buffer).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
                )
                .await;
        }
    });

    (format!("http://{}/2010-04-01", address), requests)
}

#[test]
fn test_phone_validation() {
    assert_eq!(
        TwilioSmsService::validate_phone_number("+1 415-555-2671").unwrap(),
        "+14155552671"
    );
    assert!(TwilioSmsService::validate_phone_number("4155552671").is_err());
    assert!(TwilioSmsService::validate_phone_number("+12").is_err());
}

#[tokio::test]
async fn test_failed_send_is_not_repeated() {
    let (base_url, requests) = unavailable_endpoint().await;
    let service = TwilioSmsService::new(TwilioConfig {
        account_sid: "ACtest".to_string(),
        auth_token: "token".to_string(),
        from_number: "+15551234567".to_string(),
        base_url,
        request_timeout_secs: 5,
    })
    .unwrap();

    let started = std::time::Instant::now();
    let result = service.send_sms("+14155552671", "Your code is 123456").await;

    assert!(matches!(result, Err(InfrastructureError::Sms(_))));
    assert!(started.elapsed() < std::time::Duration::from_millis(900));
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    assert_eq!(requests.load(Ordering::SeqCst), 1);
}

#[test]
fn test_verification_message_contains_code() {
    let message = verification_message("482913");
    assert!(message.contains("482913"));
    assert!(message.len() < 160);
}
