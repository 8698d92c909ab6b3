//! Support group repository

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{CreateGroupRequest, SupportGroup};

const GROUP_COLUMNS: &str =
    "id, name, description, group_type, is_public, owner_id, member_ids, invited_ids, created_at";

/// Group repository
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a group; the owner becomes its first member
    pub async fn create(
        &self,
        owner_id: Uuid,
        request: &CreateGroupRequest,
    ) -> ApiResult<SupportGroup> {
        info!("Creating group '{}' for owner {}", request.name, owner_id);

        let row = sqlx::query(
            r#"
            INSERT INTO support_groups (name, description, group_type, is_public, owner_id, member_ids)
            VALUES ($1, $2, $3, $4, $5, ARRAY[$5])
            RETURNING id, name, description, group_type, is_public, owner_id, member_ids, invited_ids, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.description)
        .bind(&request.group_type)
        .bind(request.is_public)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(group_from_row(&row))
    }

    /// Find a group by ID
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<SupportGroup>> {
        let row = sqlx::query(&format!(
            "SELECT {GROUP_COLUMNS} FROM support_groups WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(group_from_row))
    }

    /// Public groups plus private groups the user belongs to
    pub async fn list_visible(&self, user_id: Uuid) -> ApiResult<Vec<SupportGroup>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {GROUP_COLUMNS} FROM support_groups
            WHERE is_public OR $1 = ANY(member_ids)
            ORDER BY created_at DESC, id ASC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(group_from_row).collect())
    }

    /// Atomic add-to-set membership update.
    ///
    /// The append is guarded by the membership test inside one UPDATE, so
    /// concurrent joins cannot produce a duplicate entry. Returns None when
    /// nothing was updated (group absent or user already a member).
    pub async fn add_member(&self, group_id: Uuid, user_id: Uuid) -> ApiResult<Option<SupportGroup>> {
        let row = sqlx::query(
            r#"
            UPDATE support_groups
            SET member_ids = array_append(member_ids, $2)
            WHERE id = $1 AND NOT ($2 = ANY(member_ids))
            RETURNING id, name, description, group_type, is_public, owner_id, member_ids, invited_ids, created_at
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(group_from_row))
    }
}

fn group_from_row(row: &PgRow) -> SupportGroup {
    SupportGroup {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        group_type: row.get("group_type"),
        is_public: row.get("is_public"),
        owner_id: row.get("owner_id"),
        member_ids: row.get("member_ids"),
        invited_ids: row.get("invited_ids"),
        created_at: row.get("created_at"),
    }
}
