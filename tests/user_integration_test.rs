//! Integration tests for the signup, login, and user-details flows.

mod common;

use axum::http::{header, StatusCode};
use common::{read_body, read_json, TestApp};
use uuid::Uuid;

// ============================================================================
// Signup
// ============================================================================

#[tokio::test]
async fn signup_creates_a_user() {
    let app = TestApp::spawn();

    let response = app
        .request(
            "POST",
            "/user/signup",
            None,
            Some(serde_json::json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@gmail.com",
                "password": "Hello123",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["firstName"], "John");
    assert_eq!(body["lastName"], "Doe");
    assert_eq!(body["email"], "john.doe@gmail.com");
    assert!(body["uuid"].as_str().unwrap().parse::<Uuid>().is_ok());
    assert!(
        body.get("password").is_none() && body.get("passwordHash").is_none(),
        "signup response must not echo credentials"
    );
}

#[tokio::test]
async fn signup_forbids_a_duplicate_email() {
    let app = TestApp::spawn();
    app.signup("Kenny", "Pho", "pho.devourer@gmail.com", "Hello213")
        .await;

    let response = app
        .request(
            "POST",
            "/user/signup",
            None,
            Some(serde_json::json!({
                "firstName": "Lenny",
                "lastName": "Pho",
                "email": "pho.devourer@gmail.com",
                "password": "Hello123",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(
        body["errors"],
        serde_json::json!(["A user with that email already exists"])
    );
}

#[tokio::test]
async fn signup_reports_each_missing_field() {
    let app = TestApp::spawn();

    let response = app
        .request(
            "POST",
            "/user/signup",
            None,
            Some(serde_json::json!({
                "firstName": "Dempsey",
                "email": "dempsey.lamnington@gmail.com",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(
        body["errors"],
        serde_json::json!([
            { "message": "\"lastName\" is required", "path": "lastName" },
            { "message": "\"password\" is required", "path": "password" },
        ])
    );
}

#[tokio::test]
async fn signup_rejects_a_short_password() {
    let app = TestApp::spawn();

    let response = app
        .request(
            "POST",
            "/user/signup",
            None,
            Some(serde_json::json!({
                "firstName": "John",
                "lastName": "Doe",
                "email": "john.doe@gmail.com",
                "password": "short",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(
        body["errors"],
        serde_json::json!([{
            "message": "\"password\" length must be at least 8 characters long",
            "path": "password",
        }])
    );
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn login_issues_a_decryptable_session_token() {
    let app = TestApp::spawn();
    app.signup("Dung", "Eater", "dung.eater@gmail.com", "IAmTheDungEater")
        .await;

    let response = app
        .request(
            "POST",
            "/user/login",
            None,
            Some(serde_json::json!({
                "username": "dung.eater@gmail.com",
                "password": "IAmTheDungEater",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let token = response
        .headers()
        .get(header::AUTHORIZATION)
        .unwrap()
        .to_str()
        .unwrap()
        .strip_prefix("Bearer ")
        .unwrap()
        .to_string();
    assert!(read_body(response).await.is_empty());

    let claims = app.state.tokens.verify(&token).unwrap();
    assert_eq!(claims.sub, "dung.eater@gmail.com");
    assert_eq!(claims.username, "dung.eater@gmail.com");
    assert_eq!(claims.iss, common::TEST_SERVICE_NAME);
    assert!(claims.roles.is_empty());
    assert_eq!(claims.nbf, claims.iat);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[tokio::test]
async fn login_with_a_wrong_password_fails() {
    let app = TestApp::spawn();
    app.signup("John", "Doe", "john.doe@gmail.com", "Hello123")
        .await;

    let response = app
        .request(
            "POST",
            "/user/login",
            None,
            Some(serde_json::json!({
                "username": "john.doe@gmail.com",
                "password": "Hello124",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["errors"], serde_json::json!(["Login attempt failed."]));
}

#[tokio::test]
async fn login_for_an_unknown_user_fails_the_same_way() {
    let app = TestApp::spawn();

    let response = app
        .request(
            "POST",
            "/user/login",
            None,
            Some(serde_json::json!({
                "username": "nobody@gmail.com",
                "password": "Hello123",
            })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = read_json(response).await;
    assert_eq!(body["errors"], serde_json::json!(["Login attempt failed."]));
}

// ============================================================================
// User details
// ============================================================================

#[tokio::test]
async fn user_details_require_a_session() {
    let app = TestApp::spawn();

    let response = app.request("GET", "/user", None, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(
        body["errors"],
        serde_json::json!(["You must be logged in to view your user details."])
    );
}

#[tokio::test]
async fn a_garbage_token_is_treated_as_anonymous() {
    let app = TestApp::spawn();

    let response = app
        .request("GET", "/user", Some("definitely-not-a-token"), None)
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_details_are_returned_without_the_password_hash() {
    let app = TestApp::spawn();
    app.signup("John", "Doe", "john.doe@gmail.com", "Hello123")
        .await;
    let token = app.login("john.doe@gmail.com", "Hello123").await;

    let response = app.request("GET", "/user", Some(&token), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body,
        serde_json::json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john.doe@gmail.com",
        })
    );
}
