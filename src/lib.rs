pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repository;
pub mod services;
pub mod utils;

use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

use crate::config::IdentityConfig;
use crate::services::{InviteService, TokenService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub config: IdentityConfig,
    pub users: UserService,
    pub invites: InviteService,
    pub tokens: TokenService,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/user/signup", post(handlers::user::signup))
        .route("/user/login", post(handlers::user::login))
        .route("/user", get(handlers::user::user_details))
        .route("/invite", post(handlers::invite::create_invite))
        .route("/invite/inbox", post(handlers::invite::inbox))
        // The session boundary runs for every route and never rejects;
        // anonymous callers are turned away per-route.
        .layer(from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .with_state(state)
}

/// Service health check
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
    }))
}
