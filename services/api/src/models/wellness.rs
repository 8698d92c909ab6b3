//! Wellness tracking models: moods, quizzes, resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry in a user's append-only mood log
#[derive(Debug, Clone, Serialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub mood: String,
    pub emoji: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

/// A single quiz question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub question_type: String,
}

/// A self-assessment quiz
#[derive(Debug, Clone, Serialize)]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub created_by: String,
    pub questions: Vec<QuizQuestion>,
    pub created_at: DateTime<Utc>,
}

/// Read-only reference material
#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_question_wire_shape() {
        let question = QuizQuestion {
            question: "How often do you feel nervous or anxious?".to_string(),
            options: vec!["Never".to_string(), "Always".to_string()],
            question_type: "multiple_choice".to_string(),
        };

        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["type"], "multiple_choice");

        let back: QuizQuestion = serde_json::from_value(json).unwrap();
        assert_eq!(back.question_type, "multiple_choice");
    }
}
