//! Message repository for group and direct messaging

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{ConversationSummary, Message};

/// Message repository
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a group message
    pub async fn create_group_message(
        &self,
        sender_id: Uuid,
        group_id: Uuid,
        content: &str,
    ) -> ApiResult<Message> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (sender_id, group_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, sender_id, group_id, recipient_id, content, sent_at
            "#,
        )
        .bind(sender_id)
        .bind(group_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message_from_row(&row))
    }

    /// Insert a direct message
    pub async fn create_direct_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: &str,
    ) -> ApiResult<Message> {
        let row = sqlx::query(
            r#"
            INSERT INTO messages (sender_id, recipient_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, sender_id, group_id, recipient_id, content, sent_at
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message_from_row(&row))
    }

    /// All messages in a group, oldest first
    pub async fn list_for_group(&self, group_id: Uuid) -> ApiResult<Vec<Message>> {
        let rows = sqlx::query(
            r#"
            SELECT id, sender_id, group_id, recipient_id, content, sent_at
            FROM messages
            WHERE group_id = $1
            ORDER BY sent_at ASC, id ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(message_from_row).collect())
    }

    /// One summary per distinct direct-message counterpart, most recent
    /// conversation first
    pub async fn conversations(&self, user_id: Uuid) -> ApiResult<Vec<ConversationSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT u.id AS counterpart_id,
                   u.username AS counterpart_username,
                   u.full_name AS counterpart_full_name,
                   latest.content AS last_message,
                   latest.sender_id AS last_sender_id,
                   latest.sent_at AS last_sent_at
            FROM (
                SELECT DISTINCT ON (counterpart_id)
                       counterpart_id, content, sender_id, sent_at
                FROM (
                    SELECT CASE WHEN sender_id = $1 THEN recipient_id ELSE sender_id END AS counterpart_id,
                           content, sender_id, sent_at
                    FROM messages
                    WHERE recipient_id IS NOT NULL
                      AND (sender_id = $1 OR recipient_id = $1)
                ) directed
                ORDER BY counterpart_id, sent_at DESC
            ) latest
            JOIN users u ON u.id = latest.counterpart_id
            ORDER BY latest.sent_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| ConversationSummary {
                counterpart_id: row.get("counterpart_id"),
                counterpart_username: row.get("counterpart_username"),
                counterpart_full_name: row.get("counterpart_full_name"),
                last_message: row.get("last_message"),
                last_sender_id: row.get("last_sender_id"),
                last_sent_at: row.get("last_sent_at"),
            })
            .collect())
    }
}

fn message_from_row(row: &PgRow) -> Message {
    Message {
        id: row.get("id"),
        sender_id: row.get("sender_id"),
        group_id: row.get("group_id"),
        recipient_id: row.get("recipient_id"),
        content: row.get("content"),
        sent_at: row.get("sent_at"),
    }
}
