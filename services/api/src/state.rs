//! Application state shared across handlers

use sqlx::PgPool;

use crate::jwt::JwtService;
use crate::repositories::{
    GroupRepository, MessageRepository, SessionRepository, UserRepository, WellnessRepository,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: JwtService,
    pub user_repository: UserRepository,
    pub session_repository: SessionRepository,
    pub group_repository: GroupRepository,
    pub message_repository: MessageRepository,
    pub wellness_repository: WellnessRepository,
}

impl AppState {
    /// Wire up the repositories around one shared pool
    pub fn new(db_pool: PgPool, jwt_service: JwtService) -> Self {
        AppState {
            user_repository: UserRepository::new(db_pool.clone()),
            session_repository: SessionRepository::new(db_pool.clone()),
            group_repository: GroupRepository::new(db_pool.clone()),
            message_repository: MessageRepository::new(db_pool.clone()),
            wellness_repository: WellnessRepository::new(db_pool.clone()),
            db_pool,
            jwt_service,
        }
    }
}
