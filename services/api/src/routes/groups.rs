//! Support group routes

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult},
    extract::FormFields,
    middleware::Principal,
    models::{CreateGroupRequest, SupportGroup},
    state::AppState,
};

/// Create a support group; the caller becomes owner and first member
pub async fn create_group(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    fields: FormFields,
) -> ApiResult<impl IntoResponse> {
    let request = CreateGroupRequest {
        name: fields.required("name")?,
        description: fields.optional("description"),
        group_type: fields
            .optional("group_type")
            .unwrap_or_else(|| "support".to_string()),
        is_public: fields.bool_or("is_public", true)?,
    };

    let group = state.group_repository.create(principal.0.id, &request).await?;
    info!("Group {} created by {}", group.id, principal.0.id);

    Ok(Json(group))
}

/// Public groups plus private groups the caller belongs to
pub async fn list_groups(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<impl IntoResponse> {
    let groups = state.group_repository.list_visible(principal.0.id).await?;

    Ok(Json(groups))
}

/// Join a group.
///
/// Private groups require the caller to be on the invite list; invitations
/// are granted outside this service. The membership write is an atomic
/// add-to-set, so concurrent joins cannot duplicate a member.
pub async fn join_group(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let user_id = principal.0.id;

    let group = state
        .group_repository
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    check_join_allowed(&group, user_id)?;

    match state.group_repository.add_member(group_id, user_id).await? {
        Some(group) => Ok(Json(group)),
        // The guarded update matched nothing: either the group vanished or
        // a concurrent join won the race.
        None => Err(join_race_outcome(
            state.group_repository.find_by_id(group_id).await?,
        )),
    }
}

/// Membership and visibility preconditions for joining a group
fn check_join_allowed(group: &SupportGroup, user_id: Uuid) -> ApiResult<()> {
    if group.is_member(user_id) {
        return Err(ApiError::Conflict(
            "Already a member of this group".to_string(),
        ));
    }

    if !group.is_public && !group.is_invited(user_id) {
        return Err(ApiError::Forbidden(
            "This group is private and requires an invitation".to_string(),
        ));
    }

    Ok(())
}

/// Classify a join whose guarded update matched no row
fn join_race_outcome(recheck: Option<SupportGroup>) -> ApiError {
    match recheck {
        Some(_) => ApiError::Conflict("Already a member of this group".to_string()),
        None => ApiError::NotFound("Group not found".to_string()),
    }
}

/// Messages in a group, oldest first; members only
pub async fn list_group_messages(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(group_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let group = state
        .group_repository
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Group not found".to_string()))?;

    if !group.is_member(principal.0.id) {
        return Err(ApiError::Forbidden(
            "Only group members can read its messages".to_string(),
        ));
    }

    let messages = state.message_repository.list_for_group(group_id).await?;

    Ok(Json(messages))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn group(is_public: bool, member_ids: Vec<Uuid>, invited_ids: Vec<Uuid>) -> SupportGroup {
        SupportGroup {
            id: Uuid::new_v4(),
            name: "Test Support Group".to_string(),
            description: None,
            group_type: "support".to_string(),
            is_public,
            owner_id: Uuid::new_v4(),
            member_ids,
            invited_ids,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_second_join_is_a_conflict() {
        let user_id = Uuid::new_v4();
        let err = check_join_allowed(&group(true, vec![user_id], vec![]), user_id)
            .err()
            .unwrap();
        assert_eq!(err.kind(), "conflict");
    }

    #[test]
    fn test_private_group_requires_invitation() {
        let user_id = Uuid::new_v4();

        let err = check_join_allowed(&group(false, vec![], vec![]), user_id)
            .err()
            .unwrap();
        assert_eq!(err.kind(), "forbidden");

        assert!(check_join_allowed(&group(false, vec![], vec![user_id]), user_id).is_ok());
    }

    #[test]
    fn test_public_group_join_is_allowed() {
        let user_id = Uuid::new_v4();
        assert!(check_join_allowed(&group(true, vec![Uuid::new_v4()], vec![]), user_id).is_ok());
    }

    #[test]
    fn test_lost_join_race_is_a_conflict() {
        // The guarded update matched nothing but the group still exists: a
        // concurrent join added the caller first.
        let err = join_race_outcome(Some(group(true, vec![Uuid::new_v4()], vec![])));
        assert_eq!(err.kind(), "conflict");

        assert_eq!(join_race_outcome(None).kind(), "not_found");
    }
}
