pub mod invite;
pub mod user;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::dtos::ErrorResponse;

pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::single(message))).into_response()
}

pub(crate) fn internal_error(error: impl std::fmt::Display) -> Response {
    tracing::error!(error = %error, "request failed");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
