use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Invite, InviteStatus};
use crate::services::invite::NewInvite;

#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(required(message = "\"inviter\" is required"))]
    pub inviter: Option<String>,

    #[validate(required(message = "\"invitee\" is required"))]
    pub invitee: Option<String>,
}

impl InviteRequest {
    pub fn into_details(self) -> Option<NewInvite> {
        Some(NewInvite {
            inviter: self.inviter?,
            invitee: self.invitee?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct InviteResponse {
    pub uuid: Uuid,
    pub inviter: String,
    pub invitee: String,
    pub exp: i64,
    pub status: InviteStatus,
}

impl From<Invite> for InviteResponse {
    fn from(invite: Invite) -> Self {
        Self {
            uuid: invite.uuid,
            inviter: invite.inviter,
            invitee: invite.invitee,
            exp: invite.exp,
            status: invite.status,
        }
    }
}

/// Body of a successful invite creation.
#[derive(Debug, Serialize)]
pub struct CreatedInviteResponse {
    pub invite: InviteResponse,
}

/// Body of an inbox listing.
#[derive(Debug, Serialize)]
pub struct InboxResponse {
    pub invites: Vec<InviteResponse>,
}
