//! User model - registered accounts keyed by email.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity. The email is the unique key; `password_hash` never leaves
/// the service layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uuid: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl User {
    /// Create a new user with a fresh id.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        password_hash: String,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            password_hash,
        }
    }
}
