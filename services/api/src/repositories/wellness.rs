//! Wellness repository: mood log, quizzes, resources

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::{MoodEntry, Quiz, QuizQuestion, Resource};

/// Wellness repository
#[derive(Clone)]
pub struct WellnessRepository {
    pool: PgPool,
}

impl WellnessRepository {
    /// Create a new wellness repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a mood entry to the user's log
    pub async fn record_mood(
        &self,
        user_id: Uuid,
        mood: &str,
        emoji: Option<&str>,
    ) -> ApiResult<MoodEntry> {
        let row = sqlx::query(
            r#"
            INSERT INTO mood_entries (user_id, mood, emoji)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, mood, emoji, recorded_at
            "#,
        )
        .bind(user_id)
        .bind(mood)
        .bind(emoji)
        .fetch_one(&self.pool)
        .await?;

        Ok(mood_from_row(&row))
    }

    /// The user's mood log, newest first
    pub async fn mood_history(&self, user_id: Uuid) -> ApiResult<Vec<MoodEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, mood, emoji, recorded_at
            FROM mood_entries
            WHERE user_id = $1
            ORDER BY recorded_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(mood_from_row).collect())
    }

    /// All quizzes
    pub async fn list_quizzes(&self) -> ApiResult<Vec<Quiz>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, category, created_by, questions, created_at
            FROM quizzes
            ORDER BY title ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(quiz_from_row).collect()
    }

    /// All resources
    pub async fn list_resources(&self) -> ApiResult<Vec<Resource>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, category, url, created_at
            FROM resources
            ORDER BY title ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Resource {
                id: row.get("id"),
                title: row.get("title"),
                description: row.get("description"),
                category: row.get("category"),
                url: row.get("url"),
                created_at: row.get("created_at"),
            })
            .collect())
    }

    /// Insert a quiz unless one with the same title already exists.
    /// Idempotent, safe to run on every startup.
    pub async fn ensure_quiz(
        &self,
        title: &str,
        description: &str,
        category: &str,
        created_by: &str,
        questions: &[QuizQuestion],
    ) -> ApiResult<()> {
        let questions = serde_json::to_value(questions)
            .map_err(|e| ApiError::Internal(format!("Failed to encode quiz questions: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO quizzes (title, description, category, created_by, questions)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(created_by)
        .bind(questions)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a resource unless one with the same title already exists
    pub async fn ensure_resource(
        &self,
        title: &str,
        description: &str,
        category: &str,
        url: Option<&str>,
    ) -> ApiResult<()> {
        sqlx::query(
            r#"
            INSERT INTO resources (title, description, category, url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (title) DO NOTHING
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(category)
        .bind(url)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

fn mood_from_row(row: &PgRow) -> MoodEntry {
    MoodEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        mood: row.get("mood"),
        emoji: row.get("emoji"),
        recorded_at: row.get("recorded_at"),
    }
}

fn quiz_from_row(row: &PgRow) -> ApiResult<Quiz> {
    let questions: serde_json::Value = row.get("questions");
    let questions: Vec<QuizQuestion> = serde_json::from_value(questions)
        .map_err(|e| ApiError::Internal(format!("Corrupt quiz record: {e}")))?;

    Ok(Quiz {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        created_by: row.get("created_by"),
        questions,
        created_at: row.get("created_at"),
    })
}
