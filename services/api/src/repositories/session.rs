//! Counselling session repository

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{CounsellingSession, CreateSessionRequest, SessionStatus, SessionType};

const SESSION_COLUMNS: &str = "id, student_id, counsellor_id, title, description, session_date, \
                               duration_minutes, session_type, status, created_at";

/// Session repository
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Book a new session; initial status is `requested`
    pub async fn create(
        &self,
        student_id: Uuid,
        request: &CreateSessionRequest,
    ) -> ApiResult<CounsellingSession> {
        info!(
            "Booking session for student {} with counsellor {}",
            student_id, request.counsellor_id
        );

        let row = sqlx::query(
            r#"
            INSERT INTO counselling_sessions
                (student_id, counsellor_id, title, description, session_date, duration_minutes, session_type, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 'requested')
            RETURNING id, student_id, counsellor_id, title, description, session_date,
                      duration_minutes, session_type, status, created_at
            "#,
        )
        .bind(student_id)
        .bind(request.counsellor_id)
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.session_date)
        .bind(request.duration_minutes)
        .bind(request.session_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        session_from_row(&row)
    }

    /// Sessions where the user is the student or the counsellor, by
    /// scheduled time ascending
    pub async fn list_for_user(&self, user_id: Uuid) -> ApiResult<Vec<CounsellingSession>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {SESSION_COLUMNS} FROM counselling_sessions
            WHERE student_id = $1 OR counsellor_id = $1
            ORDER BY session_date ASC, id ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(session_from_row).collect()
    }

    /// Find a session by ID
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<CounsellingSession>> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM counselling_sessions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(session_from_row).transpose()
    }

    /// Compare-and-set status update.
    ///
    /// Returns None when no row matched, which means the session is gone or
    /// its status moved concurrently; the caller decides how to report that.
    pub async fn update_status(
        &self,
        id: Uuid,
        expected: SessionStatus,
        next: SessionStatus,
    ) -> ApiResult<Option<CounsellingSession>> {
        let row = sqlx::query(
            r#"
            UPDATE counselling_sessions
            SET status = $3
            WHERE id = $1 AND status = $2
            RETURNING id, student_id, counsellor_id, title, description, session_date,
                      duration_minutes, session_type, status, created_at
            "#,
        )
        .bind(id)
        .bind(expected.as_str())
        .bind(next.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(session_from_row).transpose()
    }
}

fn session_from_row(row: &PgRow) -> ApiResult<CounsellingSession> {
    let status: String = row.get("status");
    let session_type: String = row.get("session_type");

    Ok(CounsellingSession {
        id: row.get("id"),
        student_id: row.get("student_id"),
        counsellor_id: row.get("counsellor_id"),
        title: row.get("title"),
        description: row.get("description"),
        session_date: row.get("session_date"),
        duration_minutes: row.get("duration_minutes"),
        session_type: session_type
            .parse::<SessionType>()
            .map_err(|e| ApiError::Internal(format!("Corrupt session record: {e}")))?,
        status: status
            .parse::<SessionStatus>()
            .map_err(|e| ApiError::Internal(format!("Corrupt session record: {e}")))?,
        created_at: row.get("created_at"),
    })
}
