//! In-memory repository implementations backing the default deployment.

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::RwLock;

use crate::models::{Invite, User};
use crate::repository::{InviteRepository, RepositoryError, UserRepository};

/// User store keyed by email. The dashmap entry API gives the atomic
/// create-if-absent the repository contract requires.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create_if_absent(&self, user: User) -> Result<User, RepositoryError> {
        match self.users.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.get(email).map(|entry| entry.value().clone()))
    }
}

/// Invite store. A guarded Vec keeps insertion order for inbox listings.
#[derive(Default)]
pub struct InMemoryInviteRepository {
    invites: RwLock<Vec<Invite>>,
}

impl InMemoryInviteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn create(&self, invite: Invite) -> Result<Invite, RepositoryError> {
        self.invites
            .write()
            .map_err(|e| anyhow::anyhow!("invite store lock poisoned: {e}"))?
            .push(invite.clone());
        Ok(invite)
    }

    async fn find_by_participant(&self, email: &str) -> Result<Vec<Invite>, RepositoryError> {
        let invites = self
            .invites
            .read()
            .map_err(|e| anyhow::anyhow!("invite store lock poisoned: {e}"))?;

        Ok(invites
            .iter()
            .filter(|invite| invite.involves(email))
            .cloned()
            .collect())
    }
}
