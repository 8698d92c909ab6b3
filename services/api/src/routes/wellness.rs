//! Wellness routes: mood tracking, quizzes, resources

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::ApiResult, extract::FormFields, middleware::Principal, state::AppState,
};

/// Append an entry to the caller's mood log
pub async fn record_mood(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    fields: FormFields,
) -> ApiResult<impl IntoResponse> {
    let mood = fields.required("mood")?;
    let emoji = fields.optional("emoji");

    let entry = state
        .wellness_repository
        .record_mood(principal.0.id, &mood, emoji.as_deref())
        .await?;

    Ok(Json(entry))
}

/// The caller's mood log, newest first
pub async fn mood_history(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<impl IntoResponse> {
    let history = state
        .wellness_repository
        .mood_history(principal.0.id)
        .await?;

    Ok(Json(history))
}

/// All quizzes; public
pub async fn list_quizzes(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let quizzes = state.wellness_repository.list_quizzes().await?;

    Ok(Json(quizzes))
}

/// All resources; public
pub async fn list_resources(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let resources = state.wellness_repository.list_resources().await?;

    Ok(Json(resources))
}
