use std::sync::Arc;

use chrono::Utc;

use crate::models::Invite;
use crate::repository::InviteRepository;
use crate::services::{ServiceError, UserService};

/// Invite details as received from the transport. The caller-equals-inviter
/// check happens at the route boundary; this service trusts its `inviter`.
#[derive(Debug, Clone)]
pub struct NewInvite {
    pub inviter: String,
    pub invitee: String,
}

#[derive(Clone)]
pub struct InviteService {
    users: UserService,
    repository: Arc<dyn InviteRepository>,
}

impl InviteService {
    pub fn new(users: UserService, repository: Arc<dyn InviteRepository>) -> Self {
        Self { users, repository }
    }

    /// Create an invite. Rules in order, first failure wins: no
    /// self-invites, then the invitee must be registered.
    pub async fn create(&self, details: NewInvite) -> Result<Invite, ServiceError> {
        if details.inviter == details.invitee {
            return Err(ServiceError::InvalidInvitation(
                "Users can not send invites to themselves.".to_string(),
            ));
        }

        if !self.users.does_user_exist(&details.invitee).await? {
            return Err(ServiceError::InvalidInvitation(
                "Invitee does not exist.".to_string(),
            ));
        }

        let invite = Invite::new(details.inviter, details.invitee, Utc::now());
        let invite = self
            .repository
            .create(invite)
            .await
            .map_err(|e| ServiceError::Internal(e.into()))?;

        tracing::info!(invite = %invite.uuid, "invite created");
        Ok(invite)
    }

    /// Inbox semantics: every invite where `email` is inviter or invitee,
    /// in insertion order.
    pub async fn invites_for(&self, email: &str) -> Result<Vec<Invite>, ServiceError> {
        self.repository
            .find_by_participant(email)
            .await
            .map_err(|e| ServiceError::Internal(e.into()))
    }
}
