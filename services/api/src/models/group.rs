//! Support group model

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A peer support group
#[derive(Debug, Clone, Serialize)]
pub struct SupportGroup {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub group_type: String,
    pub is_public: bool,
    pub owner_id: Uuid,
    pub member_ids: Vec<Uuid>,
    /// Users granted access to a private group. Invitations are issued by
    /// an external process; this service only consults the list on join.
    #[serde(skip_serializing)]
    pub invited_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl SupportGroup {
    pub fn is_member(&self, user_id: Uuid) -> bool {
        self.member_ids.contains(&user_id)
    }

    pub fn is_invited(&self, user_id: Uuid) -> bool {
        self.invited_ids.contains(&user_id)
    }
}

/// Group creation payload, decoded from form fields at the boundary
#[derive(Debug, Clone)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub group_type: String,
    pub is_public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invite_list_not_serialized() {
        let group = SupportGroup {
            id: Uuid::new_v4(),
            name: "Test Support Group".to_string(),
            description: None,
            group_type: "support".to_string(),
            is_public: false,
            owner_id: Uuid::new_v4(),
            member_ids: vec![],
            invited_ids: vec![Uuid::new_v4()],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&group).unwrap();
        assert!(json.get("invited_ids").is_none());
        assert!(json.get("member_ids").is_some());
    }
}
