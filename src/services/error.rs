use thiserror::Error;

/// Typed domain failures. Display strings double as the wire messages, so
/// handlers map variants to status codes and pass the text through.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("A user with that email already exists")]
    UserAlreadyExists,

    /// Unknown email and wrong password collapse into the same variant so
    /// the login surface can not leak which accounts exist.
    #[error("Login attempt failed.")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    InvalidInvitation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
