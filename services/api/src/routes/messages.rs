//! Messaging routes: group messages, direct messages, conversations

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::{ApiError, ApiResult},
    extract::FormFields,
    middleware::Principal,
    models::MessageTarget,
    state::AppState,
};

/// Send a message to a group or directly to another user.
///
/// Exactly one of `group_id` and `recipient_id` must be given; group
/// messages require membership.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    fields: FormFields,
) -> ApiResult<impl IntoResponse> {
    let content = fields.required("content")?;
    let group_id = fields.optional_uuid("group_id")?;
    let recipient_id = fields.optional_uuid("recipient_id")?;

    let target =
        MessageTarget::from_ids(group_id, recipient_id).map_err(ApiError::Validation)?;
    let sender_id = principal.0.id;

    let message = match target {
        MessageTarget::Group(group_id) => {
            let group = state
                .group_repository
                .find_by_id(group_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

            if !group.is_member(sender_id) {
                return Err(ApiError::Forbidden(
                    "Only group members can post to a group".to_string(),
                ));
            }

            state
                .message_repository
                .create_group_message(sender_id, group_id, &content)
                .await?
        }
        MessageTarget::Direct(recipient_id) => {
            state
                .user_repository
                .find_by_id(recipient_id)
                .await?
                .ok_or_else(|| ApiError::NotFound("Recipient not found".to_string()))?;

            state
                .message_repository
                .create_direct_message(sender_id, recipient_id, &content)
                .await?
        }
    };

    Ok(Json(message))
}

/// One summary per direct-message counterpart, most recent first
pub async fn list_conversations(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<impl IntoResponse> {
    let conversations = state
        .message_repository
        .conversations(principal.0.id)
        .await?;

    Ok(Json(conversations))
}
