//! Test helper module for identity-service integration tests.
//!
//! Builds the real router over in-memory repositories and a generated RSA
//! keypair, and drives it in-process through `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use identity_service::{
    build_router,
    config::{Environment, IdentityConfig, SessionConfig},
    repository::{InMemoryInviteRepository, InMemoryUserRepository},
    services::{InviteService, TokenService, UserService},
    AppState,
};
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SERVICE_NAME: &str = "identity-service";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

impl TestApp {
    pub fn spawn() -> Self {
        let config = IdentityConfig {
            environment: Environment::Dev,
            service_name: TEST_SERVICE_NAME.to_string(),
            service_version: "0.0.0-test".to_string(),
            log_level: "error".to_string(),
            port: 0,
            session: SessionConfig {
                private_key_path: "unused-in-tests".to_string(),
                token_ttl_hours: 24,
            },
        };

        let private_key =
            RsaPrivateKey::new(&mut OsRng, 2048).expect("Failed to generate test keypair");
        let tokens = TokenService::new(private_key, TEST_SERVICE_NAME, 24);

        let users = UserService::new(Arc::new(InMemoryUserRepository::new()));
        let invites =
            InviteService::new(users.clone(), Arc::new(InMemoryInviteRepository::new()));

        let state = AppState {
            config,
            users,
            invites,
            tokens,
        };

        Self {
            router: build_router(state.clone()),
            state,
        }
    }

    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        bearer: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed")
    }

    pub async fn signup(&self, first_name: &str, last_name: &str, email: &str, password: &str) {
        let response = self
            .request(
                "POST",
                "/user/signup",
                None,
                Some(serde_json::json!({
                    "firstName": first_name,
                    "lastName": last_name,
                    "email": email,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    /// Log in and return the bearer token from the Authorization header.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/user/login",
                None,
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        response
            .headers()
            .get(header::AUTHORIZATION)
            .expect("login response missing Authorization header")
            .to_str()
            .expect("Authorization header is not valid UTF-8")
            .strip_prefix("Bearer ")
            .expect("Authorization header is not a bearer credential")
            .to_string()
    }
}

pub async fn read_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body is not JSON")
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec()
}
