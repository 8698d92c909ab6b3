//! Directory and search routes

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;

use crate::{error::ApiResult, models::UserResponse, state::AppState};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Case-insensitive partial match over username and full name
pub async fn search_users(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let users = state.user_repository.search(query.q.trim()).await?;

    Ok(Json(
        users
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// All counsellor accounts; public
pub async fn list_counsellors(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let counsellors = state.user_repository.list_counsellors().await?;

    Ok(Json(
        counsellors
            .into_iter()
            .map(UserResponse::from)
            .collect::<Vec<_>>(),
    ))
}
