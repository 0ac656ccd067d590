use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::dtos::{FieldError, FieldErrorResponse};

/// JSON extractor that runs schema validation before the handler sees the
/// body. Failures become a 403 with one `{message, path}` entry per missing
/// or invalid field, so the check pipeline is schema validity first, then
/// authentication, then payload authorization.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            let errors = vec![FieldError {
                message: format!("Invalid request body: {e}"),
                path: String::new(),
            }];
            (StatusCode::FORBIDDEN, Json(FieldErrorResponse { errors })).into_response()
        })?;

        value.validate().map_err(|e| {
            let errors = field_errors(&e);
            (StatusCode::FORBIDDEN, Json(FieldErrorResponse { errors })).into_response()
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validator output into wire-shaped field errors. Paths use the
/// JSON field names; entries are sorted by path so responses are
/// deterministic.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        let path = camel_case(field);
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("\"{path}\" is invalid"));
            out.push(FieldError {
                message,
                path: path.clone(),
            });
        }
    }

    out.sort_by(|a, b| a.path.cmp(&b.path).then_with(|| a.message.cmp(&b.message)));
    out
}

/// Struct fields are snake_case; the wire format is camelCase.
fn camel_case(field: &str) -> String {
    let mut parts = field.split('_');
    let mut out = String::with_capacity(field.len());

    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }

    out
}
