//! Messaging model: group messages and direct messages

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A message in a group or between two users.
///
/// Exactly one of `group_id` and `recipient_id` is set; the database
/// enforces the same invariant with a CHECK constraint.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub group_id: Option<Uuid>,
    pub recipient_id: Option<Uuid>,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// Where a message is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTarget {
    Group(Uuid),
    Direct(Uuid),
}

impl MessageTarget {
    /// Resolve the target from the optional ids a client sends.
    pub fn from_ids(group_id: Option<Uuid>, recipient_id: Option<Uuid>) -> Result<Self, String> {
        match (group_id, recipient_id) {
            (Some(group), None) => Ok(MessageTarget::Group(group)),
            (None, Some(recipient)) => Ok(MessageTarget::Direct(recipient)),
            (Some(_), Some(_)) => {
                Err("provide either group_id or recipient_id, not both".to_string())
            }
            (None, None) => Err("either group_id or recipient_id is required".to_string()),
        }
    }
}

/// One direct-message counterpart with the latest message exchanged
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub counterpart_id: Uuid,
    pub counterpart_username: String,
    pub counterpart_full_name: String,
    pub last_message: String,
    pub last_sender_id: Uuid,
    pub last_sent_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_requires_exactly_one_id() {
        let group = Uuid::new_v4();
        let user = Uuid::new_v4();

        assert_eq!(
            MessageTarget::from_ids(Some(group), None),
            Ok(MessageTarget::Group(group))
        );
        assert_eq!(
            MessageTarget::from_ids(None, Some(user)),
            Ok(MessageTarget::Direct(user))
        );
        assert!(MessageTarget::from_ids(Some(group), Some(user)).is_err());
        assert!(MessageTarget::from_ids(None, None).is_err());
    }
}
