//! Counselling session booking model and status rules

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Requested => "requested",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the booking state machine allows this transition.
    ///
    /// requested -> confirmed -> completed, with cancellation possible from
    /// any state before completion. Party and timing rules are enforced by
    /// the handler, not here.
    pub fn may_become(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Requested, Confirmed)
                | (Confirmed, Completed)
                | (Requested, Cancelled)
                | (Confirmed, Cancelled)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(SessionStatus::Requested),
            "confirmed" => Ok(SessionStatus::Confirmed),
            "completed" => Ok(SessionStatus::Completed),
            "cancelled" => Ok(SessionStatus::Cancelled),
            other => Err(format!("unknown session status: {other}")),
        }
    }
}

/// How the session is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Video,
    Chat,
    #[serde(rename = "in_person")]
    InPerson,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionType::Video => "video",
            SessionType::Chat => "chat",
            SessionType::InPerson => "in_person",
        }
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(SessionType::Video),
            "chat" => Ok(SessionType::Chat),
            "in_person" => Ok(SessionType::InPerson),
            other => Err(format!("unknown session type: {other}")),
        }
    }
}

/// A booked counselling session between a student and a counsellor
#[derive(Debug, Clone, Serialize)]
pub struct CounsellingSession {
    pub id: Uuid,
    pub student_id: Uuid,
    pub counsellor_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub session_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
}

/// Session booking payload
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub counsellor_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_session_date")]
    pub session_date: DateTime<Utc>,
    pub duration_minutes: i32,
    pub session_type: SessionType,
}

/// Status transition payload
#[derive(Debug, Deserialize)]
pub struct UpdateSessionStatusRequest {
    pub status: SessionStatus,
}

/// Parse a client-supplied timestamp.
///
/// Accepts RFC 3339 as well as the naive ISO form Python's
/// `datetime.isoformat()` produces; naive timestamps are taken as UTC.
pub fn parse_session_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
    }
    Err(format!("invalid timestamp: {raw}"))
}

fn deserialize_session_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_session_date(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use SessionStatus::*;

    #[test]
    fn test_allowed_transitions() {
        assert!(Requested.may_become(Confirmed));
        assert!(Requested.may_become(Cancelled));
        assert!(Confirmed.may_become(Completed));
        assert!(Confirmed.may_become(Cancelled));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!Requested.may_become(Completed));
        assert!(!Requested.may_become(Requested));
        assert!(!Confirmed.may_become(Requested));
        assert!(!Completed.may_become(Cancelled));
        assert!(!Completed.may_become(Confirmed));
        assert!(!Cancelled.may_become(Confirmed));
        assert!(!Cancelled.may_become(Completed));
    }

    #[test]
    fn test_parse_rfc3339_date() {
        let dt = parse_session_date("2026-09-01T10:00:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-09-01T08:00:00+00:00");
    }

    #[test]
    fn test_parse_naive_isoformat_date() {
        // Python clients send datetime.isoformat() without an offset
        let dt = parse_session_date("2026-09-01T10:00:00.123456").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-09-01T10:00:00.123456+00:00");
        assert!(parse_session_date("2026-09-01T10:00:00").is_ok());
        assert!(parse_session_date("tomorrow").is_err());
    }

    #[test]
    fn test_create_session_request_deserializes_naive_date() {
        let req: CreateSessionRequest = serde_json::from_value(serde_json::json!({
            "counsellor_id": "7b1a3a74-9f48-4f5c-9b2e-1d2f3a4b5c6d",
            "title": "Test Counselling Session",
            "description": "Anxiety management",
            "session_date": "2026-09-01T10:00:00.500",
            "duration_minutes": 60,
            "session_type": "video"
        }))
        .unwrap();
        assert_eq!(req.session_type, SessionType::Video);
        assert_eq!(req.duration_minutes, 60);
    }
}
