//! Integration tests for the access gate

mod common;

use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use bizreg_api::app::create_app;
use bizreg_core::services::token::{FixedClock, TokenService, TokenServiceConfig};
use common::TestContext;

#[actix_rt::test]
async fn test_missing_header_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let req = test::TestRequest::get().uri("/api/company/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[actix_rt::test]
async fn test_non_bearer_scheme_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let token = ctx.tokens.issue(Uuid::new_v4(), "a@x.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/api/company/profile")
        .insert_header((AUTHORIZATION, format!("Token {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Access denied. No token provided.");
}

#[actix_rt::test]
async fn test_bad_token_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let req = test::TestRequest::get()
        .uri("/api/company/profile")
        .insert_header((AUTHORIZATION, "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid token");
}

#[actix_rt::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let foreign = TokenService::new(TokenServiceConfig {
        jwt_secret: "another-secret".to_string(),
        ..Default::default()
    });
    let token = foreign.issue(Uuid::new_v4(), "a@x.com").unwrap();
    let req = test::TestRequest::get()
        .uri("/dashboard")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_expired_token_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    // Issued 91 days ago with the same secret
    let past = Arc::new(FixedClock::new(Utc::now() - Duration::days(91)));
    let issuer = TokenService::with_clock(TokenServiceConfig::default(), past);
    let token = issuer.issue(Uuid::new_v4(), "a@x.com").unwrap();

    let req = test::TestRequest::get()
        .uri("/api/company/profile")
        .insert_header((AUTHORIZATION, format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_valid_token_reaches_handler() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    // Authenticated, but this owner has no profile yet
    let req = test::TestRequest::get()
        .uri("/api/company/profile")
        .insert_header((AUTHORIZATION, ctx.bearer(Uuid::new_v4())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Company profile not found");
}

#[actix_rt::test]
async fn test_unprotected_paths_need_no_header() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({"email": "nobody@x.com", "password": "whatever1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Invalid email or password");
}

#[actix_rt::test]
async fn test_lookalike_path_is_not_protected() {
    let ctx = TestContext::new();
    let app = test::init_service(create_app(ctx.state.clone(), &ctx.server)).await;

    // Shares the text prefix of /api/company but not the segment
    let req = test::TestRequest::get().uri("/api/companyX").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/company").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
