use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::dtos::invite::{CreatedInviteResponse, InboxResponse, InviteRequest, InviteResponse};
use crate::handlers::{error_response, internal_error};
use crate::middleware::Identity;
use crate::services::ServiceError;
use crate::utils::ValidatedJson;
use crate::AppState;

const INVITE_LOGIN_REQUIRED: &str = "You must be logged in to send an invite.";
const INBOX_LOGIN_REQUIRED: &str = "You must be logged in to view your invites.";
const INVITER_MISMATCH: &str = "You can not send an invite as another user.";

/// POST /invite
///
/// Check order: schema (extractor), authentication, then the payload
/// authorization that the caller is the inviter. The service trusts its
/// `inviter` argument after that.
pub async fn create_invite(
    State(state): State<AppState>,
    identity: Identity,
    ValidatedJson(request): ValidatedJson<InviteRequest>,
) -> Response {
    let Some(email) = identity.email() else {
        return error_response(StatusCode::UNAUTHORIZED, INVITE_LOGIN_REQUIRED);
    };

    let Some(details) = request.into_details() else {
        return internal_error("invite request passed validation with missing fields");
    };

    if details.inviter != email {
        return error_response(StatusCode::UNAUTHORIZED, INVITER_MISMATCH);
    }

    match state.invites.create(details).await {
        Ok(invite) => (
            StatusCode::CREATED,
            Json(CreatedInviteResponse {
                invite: InviteResponse::from(invite),
            }),
        )
            .into_response(),
        Err(e @ ServiceError::InvalidInvitation(_)) => {
            error_response(StatusCode::FORBIDDEN, e.to_string())
        }
        Err(e) => internal_error(e),
    }
}

/// POST /invite/inbox
pub async fn inbox(State(state): State<AppState>, identity: Identity) -> Response {
    let Some(email) = identity.email() else {
        return error_response(StatusCode::UNAUTHORIZED, INBOX_LOGIN_REQUIRED);
    };

    match state.invites.invites_for(email).await {
        Ok(invites) => (
            StatusCode::OK,
            Json(InboxResponse {
                invites: invites.into_iter().map(InviteResponse::from).collect(),
            }),
        )
            .into_response(),
        Err(e) => internal_error(e),
    }
}
