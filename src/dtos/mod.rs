pub mod invite;
pub mod user;

use serde::Serialize;

/// Error body for domain and authorization failures: a list of
/// human-readable messages.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errors: Vec<String>,
}

impl ErrorResponse {
    pub fn single(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

/// One schema-validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub message: String,
    pub path: String,
}

/// Error body for schema failures: one entry per missing or invalid field.
#[derive(Debug, Serialize)]
pub struct FieldErrorResponse {
    pub errors: Vec<FieldError>,
}
