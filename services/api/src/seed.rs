//! Startup seeding of system quizzes and resources
//!
//! Inserts are keyed on title and skipped when present, so seeding is
//! idempotent across restarts.

use tracing::info;

use crate::error::ApiResult;
use crate::models::QuizQuestion;
use crate::repositories::WellnessRepository;

/// Seed the system quiz and starter resources
pub async fn seed_sample_data(wellness: &WellnessRepository) -> ApiResult<()> {
    info!("Initializing sample quizzes");

    let anxiety_questions = vec![QuizQuestion {
        question: "How often do you feel nervous or anxious?".to_string(),
        options: vec![
            "Never".to_string(),
            "Sometimes".to_string(),
            "Often".to_string(),
            "Always".to_string(),
        ],
        question_type: "multiple_choice".to_string(),
    }];

    wellness
        .ensure_quiz(
            "Anxiety Assessment",
            "Evaluate your anxiety levels",
            "anxiety",
            "system",
            &anxiety_questions,
        )
        .await?;

    wellness
        .ensure_resource(
            "Understanding Anxiety",
            "An introduction to recognizing and managing anxiety as a student",
            "anxiety",
            Some("https://www.nimh.nih.gov/health/topics/anxiety-disorders"),
        )
        .await?;

    wellness
        .ensure_resource(
            "Sleep and Mental Health",
            "Why regular sleep matters and how to build a routine around exams",
            "self-care",
            None,
        )
        .await?;

    Ok(())
}
