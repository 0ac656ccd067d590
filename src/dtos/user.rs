use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::User;
use crate::services::user::{Credentials, NewUser};
use crate::utils::Password;

/// Signup body. Fields are `Option` so a missing key reports as a field
/// error instead of a serde rejection; the `required` validators close the
/// gap before any handler runs.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(
        required(message = "\"firstName\" is required"),
        length(min = 1, message = "\"firstName\" is not allowed to be empty")
    )]
    pub first_name: Option<String>,

    #[validate(
        required(message = "\"lastName\" is required"),
        length(min = 1, message = "\"lastName\" is not allowed to be empty")
    )]
    pub last_name: Option<String>,

    #[validate(
        required(message = "\"email\" is required"),
        email(message = "\"email\" must be a valid email")
    )]
    pub email: Option<String>,

    #[validate(
        required(message = "\"password\" is required"),
        length(min = 8, message = "\"password\" length must be at least 8 characters long")
    )]
    pub password: Option<String>,
}

impl SignupRequest {
    /// The `required` validators run before this; `None` here means the
    /// extractor was bypassed and the caller should fail internally.
    pub fn into_details(self) -> Option<NewUser> {
        Some(NewUser {
            first_name: self.first_name?,
            last_name: self.last_name?,
            email: self.email?,
            password: Password::new(self.password?),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub uuid: Uuid,
}

impl From<User> for SignupResponse {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            uuid: user.uuid,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(required(message = "\"username\" is required"))]
    pub username: Option<String>,

    #[validate(required(message = "\"password\" is required"))]
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn into_credentials(self) -> Option<Credentials> {
        Some(Credentials {
            email: self.username?,
            password: Password::new(self.password?),
        })
    }
}

/// User details as returned to the owning identity. The password hash never
/// crosses this boundary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailsResponse {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<User> for UserDetailsResponse {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
        }
    }
}
