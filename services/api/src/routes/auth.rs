//! Registration, login, and current-user routes

use axum::{Extension, Json, extract::State, response::IntoResponse};
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::JsonBody,
    middleware::Principal,
    models::{AuthResponse, LoginRequest, RegisterRequest, UserResponse},
    state::AppState,
    validation,
};

/// Register a new account and issue its first token
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_email(&payload.email).map_err(ApiError::Validation)?;
    validation::validate_username(&payload.username).map_err(ApiError::Validation)?;
    validation::validate_full_name(&payload.full_name).map_err(ApiError::Validation)?;
    validation::validate_password(&payload.password).map_err(ApiError::Validation)?;

    let user = state.user_repository.create(&payload).await?;
    info!("Registered {} account {}", user.user_type, user.id);

    let access_token = state.jwt_service.issue(user.id)?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt_service.expiry(),
        user: UserResponse::from(user),
    }))
}

/// Log in with email and password.
///
/// Unknown email and wrong password produce the same error; the response
/// must not reveal which check failed.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = state
        .user_repository
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(invalid)?;

    if !state.user_repository.verify_password(&user, &payload.password)? {
        return Err(invalid());
    }

    let access_token = state.jwt_service.issue(user.id)?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.jwt_service.expiry(),
        user: UserResponse::from(user),
    }))
}

/// Profile of the authenticated principal
pub async fn me(Extension(principal): Extension<Principal>) -> ApiResult<impl IntoResponse> {
    Ok(Json(UserResponse::from(principal.0)))
}
