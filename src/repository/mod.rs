//! Storage-facing contracts for the domain services.
//!
//! Services depend on these traits only; the in-memory implementations in
//! [`memory`] are one interchangeable backend. A persistent store can be
//! swapped in later without touching service logic.

pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Invite, User};

pub use memory::{InMemoryInviteRepository, InMemoryUserRepository};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A record with the same unique key already exists.
    #[error("record already exists")]
    AlreadyExists,

    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Durable mapping from email to user record.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist `user` unless a record with the same email exists.
    ///
    /// The insert must be atomic with respect to the uniqueness check, so
    /// that exactly one of two concurrent signups for the same email wins.
    async fn create_if_absent(&self, user: User) -> Result<User, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

/// Durable mapping from invite id to invite record.
#[async_trait]
pub trait InviteRepository: Send + Sync {
    async fn create(&self, invite: Invite) -> Result<Invite, RepositoryError>;

    /// All invites where `email` is inviter or invitee, in insertion order.
    async fn find_by_participant(&self, email: &str) -> Result<Vec<Invite>, RepositoryError>;
}
