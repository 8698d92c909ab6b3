//! HTTP routes for the MindMate API
//!
//! Everything lives under `/api`; protected routes sit behind the JWT
//! middleware, which attaches a `Principal` to each request.

pub mod auth;
pub mod groups;
pub mod messages;
pub mod sessions;
pub mod users;
pub mod wellness;

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/users/counsellors", get(users::list_counsellors))
        .route("/quizzes", get(wellness::list_quizzes))
        .route("/resources", get(wellness::list_resources));

    let protected = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/users/search", get(users::search_users))
        .route(
            "/sessions",
            post(sessions::create_session).get(sessions::list_sessions),
        )
        .route("/sessions/:id/status", put(sessions::update_status))
        .route(
            "/groups",
            post(groups::create_group).get(groups::list_groups),
        )
        .route("/groups/:id/join", post(groups::join_group))
        .route("/groups/:id/messages", get(groups::list_group_messages))
        .route("/messages", post(messages::send_message))
        .route("/messages/conversations", get(messages::list_conversations))
        .route("/mood", post(wellness::record_mood))
        .route("/mood/history", get(wellness::mood_history))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(liveness))
        .nest("/api", public.merge(protected))
        .with_state(state)
}

/// Liveness endpoint
pub async fn liveness() -> impl IntoResponse {
    Json(json!({
        "message": "MindMate backend is running"
    }))
}
