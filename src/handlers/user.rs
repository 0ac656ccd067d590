use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::dtos::user::{LoginRequest, SignupRequest, SignupResponse, UserDetailsResponse};
use crate::handlers::{error_response, internal_error};
use crate::middleware::Identity;
use crate::services::ServiceError;
use crate::utils::ValidatedJson;
use crate::AppState;

const DETAILS_LOGIN_REQUIRED: &str = "You must be logged in to view your user details.";

/// POST /user/signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> Response {
    let Some(details) = request.into_details() else {
        return internal_error("signup request passed validation with missing fields");
    };

    match state.users.create(details).await {
        Ok(user) => (StatusCode::CREATED, Json(SignupResponse::from(user))).into_response(),
        Err(e @ ServiceError::UserAlreadyExists) => {
            error_response(StatusCode::FORBIDDEN, e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// POST /user/login
///
/// On success the token travels in the `Authorization` response header and
/// the body stays empty.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Response {
    let Some(credentials) = request.into_credentials() else {
        return internal_error("login request passed validation with missing fields");
    };

    match state.users.authenticate(&credentials).await {
        Ok(()) => match state.tokens.issue(&credentials.email) {
            Ok(token) => (
                StatusCode::OK,
                [(header::AUTHORIZATION, format!("Bearer {token}"))],
            )
                .into_response(),
            Err(e) => internal_error(e),
        },
        Err(e @ ServiceError::AuthenticationFailed) => {
            error_response(StatusCode::FORBIDDEN, e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// GET /user
pub async fn user_details(State(state): State<AppState>, identity: Identity) -> Response {
    let Some(email) = identity.email() else {
        return error_response(StatusCode::UNAUTHORIZED, DETAILS_LOGIN_REQUIRED);
    };

    match state.users.user_details(email).await {
        Ok(user) => (StatusCode::OK, Json(UserDetailsResponse::from(user))).into_response(),
        Err(e @ ServiceError::UserNotFound) => error_response(StatusCode::FORBIDDEN, e.to_string()),
        Err(e) => internal_error(e),
    }
}
