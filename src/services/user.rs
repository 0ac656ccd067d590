use std::sync::Arc;

use crate::models::User;
use crate::repository::{RepositoryError, UserRepository};
use crate::services::ServiceError;
use crate::utils::password::{hash_password, verify_password, Password, PasswordHashString};

/// Signup details after schema validation. The raw password lives only in
/// this transient value and is never persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: Password,
}

/// Login credentials. Transient, never persisted.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: Password,
}

#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Register a new user. The email-uniqueness check and the insert are a
    /// single atomic repository operation, so concurrent signups for the
    /// same email produce exactly one user.
    pub async fn create(&self, details: NewUser) -> Result<User, ServiceError> {
        let password = details.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| ServiceError::Internal(e.into()))?
            .map_err(|e| ServiceError::Internal(e.into()))?;

        let user = User::new(
            details.first_name,
            details.last_name,
            details.email,
            password_hash.into_string(),
        );

        match self.repository.create_if_absent(user).await {
            Ok(user) => {
                tracing::info!(user = %user.uuid, "user registered");
                Ok(user)
            }
            Err(RepositoryError::AlreadyExists) => Err(ServiceError::UserAlreadyExists),
            Err(e) => Err(ServiceError::Internal(e.into())),
        }
    }

    /// Check credentials. Unknown email and password mismatch are the same
    /// failure.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<(), ServiceError> {
        let user = self
            .repository
            .find_by_email(&credentials.email)
            .await
            .map_err(|e| ServiceError::Internal(e.into()))?;

        let Some(user) = user else {
            return Err(ServiceError::AuthenticationFailed);
        };

        let password = credentials.password.clone();
        let stored_hash = PasswordHashString::new(user.password_hash);
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash))
            .await
            .map_err(|e| ServiceError::Internal(e.into()))?
            .map_err(|e| ServiceError::Internal(e.into()))?;

        if verified {
            Ok(())
        } else {
            Err(ServiceError::AuthenticationFailed)
        }
    }

    pub async fn does_user_exist(&self, email: &str) -> Result<bool, ServiceError> {
        let user = self
            .repository
            .find_by_email(email)
            .await
            .map_err(|e| ServiceError::Internal(e.into()))?;
        Ok(user.is_some())
    }

    pub async fn user_details(&self, email: &str) -> Result<User, ServiceError> {
        self.repository
            .find_by_email(email)
            .await
            .map_err(|e| ServiceError::Internal(e.into()))?
            .ok_or(ServiceError::UserNotFound)
    }
}
