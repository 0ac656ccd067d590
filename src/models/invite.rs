//! Invite model - a proposed relationship between two registered users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DAY_IN_MILLISECONDS: i64 = 24 * 60 * 60 * 1000;

/// Invitation state codes. `Pending` is the only state an invite can hold
/// today; the enum leaves room for an accept/decline flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InviteStatus {
    Pending,
}

/// Invite entity. Immutable after creation; participants are referenced by
/// email, not by ownership edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub uuid: Uuid,
    pub inviter: String,
    pub invitee: String,
    /// Expiry as epoch milliseconds, one day after creation.
    pub exp: i64,
    pub status: InviteStatus,
}

impl Invite {
    pub fn new(inviter: String, invitee: String, created_at: DateTime<Utc>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            inviter,
            invitee,
            exp: created_at.timestamp_millis() + DAY_IN_MILLISECONDS,
            status: InviteStatus::Pending,
        }
    }

    /// Whether `email` participates in this invite, on either side.
    pub fn involves(&self, email: &str) -> bool {
        self.inviter == email || self.invitee == email
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_one_day_after_creation() {
        let created_at = Utc::now();
        let invite = Invite::new("a@example.com".into(), "b@example.com".into(), created_at);

        assert_eq!(
            invite.exp,
            created_at.timestamp_millis() + DAY_IN_MILLISECONDS
        );
        assert_eq!(invite.status, InviteStatus::Pending);
    }

    #[test]
    fn status_serializes_uppercase() {
        let json = serde_json::to_string(&InviteStatus::Pending).unwrap();
        assert_eq!(json, "\"PENDING\"");
    }

    #[test]
    fn involves_matches_both_sides() {
        let invite = Invite::new("a@example.com".into(), "b@example.com".into(), Utc::now());

        assert!(invite.involves("a@example.com"));
        assert!(invite.involves("b@example.com"));
        assert!(!invite.involves("c@example.com"));
    }
}
