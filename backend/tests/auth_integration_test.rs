//! Integration tests for session endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_me_requires_token() {
    let app = common::TestApp::lazy();

    let (status, body) = app.get("/api/v1/auth/me").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(common::json(&body)["error"]["message"], "Missing token");
}

#[tokio::test]
async fn test_refresh_token_not_accepted_as_access() {
    let app = common::TestApp::lazy();
    let refresh = app.jwt.generate_refresh_token(uuid::Uuid::new_v4()).unwrap();

    let (status, _) = app.get_auth("/api/v1/weight", &refresh).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let app = common::TestApp::lazy();

    let body = json!({ "email": "someone@example.com", "password": "short" });
    let (status, response) = app.post("/api/v1/auth/register", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::json(&response)["error"]["field"], "password");
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    let app = common::TestApp::lazy();

    let body = json!({ "email": "not-an-email", "password": "SecurePassword123!" });
    let (status, response) = app.post("/api/v1/auth/register", &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::json(&response)["error"]["field"], "email");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_login_refresh_flow() {
    let app = common::TestApp::new().await;

    let email = format!("flow_{}@example.com", uuid::Uuid::new_v4());
    let credentials = json!({ "email": email, "password": "SecurePassword123!" });

    let (status, _) = app.post("/api/v1/auth/register", &credentials).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = app.post("/api/v1/auth/login", &credentials).await;
    assert_eq!(status, StatusCode::OK);
    let tokens = common::json(&response);
    assert_eq!(tokens["token_type"], "Bearer");

    let refresh = json!({ "refresh_token": tokens["refresh_token"] });
    let (status, response) = app.post("/api/v1/auth/refresh", &refresh).await;
    assert_eq!(status, StatusCode::OK);
    let access = common::json(&response)["access_token"].as_str().unwrap().to_string();

    let (status, me) = app.get_auth("/api/v1/auth/me", &access).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&me)["email"], email);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_email() {
    let app = common::TestApp::new().await;

    let body = json!({
        "email": format!("duplicate_{}@example.com", uuid::Uuid::new_v4()),
        "password": "SecurePassword123!"
    });

    let (status, _) = app.post("/api/v1/auth/register", &body).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app.post("/api/v1/auth/register", &body).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;

    let email = format!("wrong_pw_{}@example.com", uuid::Uuid::new_v4());
    let body = json!({ "email": email, "password": "SecurePassword123!" });
    app.post("/api/v1/auth/register", &body).await;

    let bad = json!({ "email": email, "password": "WrongPassword123!" });
    let (status, _) = app.post("/api/v1/auth/login", &bad).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
