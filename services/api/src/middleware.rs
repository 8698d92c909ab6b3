//! Authentication middleware for JWT token validation
//!
//! Validates the bearer token once per request, loads the account it names,
//! and attaches it to the request as a [`Principal`] for handlers to use.

use axum::{
    RequestExt,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{error::ApiError, models::User, state::AppState};

/// The authenticated user attached to a request
#[derive(Debug, Clone)]
pub struct Principal(pub User);

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = req
        .extract_parts::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| {
            ApiError::Unauthorized("Missing or malformed Authorization header".to_string())
        })?;

    let claims = state.jwt_service.validate(bearer.token())?;

    let user = state
        .user_repository
        .find_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Unknown user".to_string()))?;

    req.extensions_mut().insert(Principal(user));

    Ok(next.run(req).await)
}
