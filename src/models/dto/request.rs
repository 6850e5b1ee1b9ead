use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{
    models::domain::{AcademicYear, UserRole},
    quiz::{Category, Difficulty},
};

const DEFAULT_BOOKING_TOPIC: &str = "Initial Mentorship Query";

fn default_booking_topic() -> String {
    DEFAULT_BOOKING_TOPIC.to_string()
}

/// Accepts 24-hour `HH:MM`.
fn validate_clock_time(value: &str) -> Result<(), ValidationError> {
    let valid = match value.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 => matches!(
            (h.parse::<u8>(), m.parse::<u8>()),
            (Ok(h), Ok(m)) if h < 24 && m < 60
        ),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("clock_time");
        err.message = Some("Time must be formatted as HH:MM".into());
        Err(err)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartQuizRequest {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssignRoleRequest {
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StudentOnboardingRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(length(min = 1, max = 200))]
    pub institution: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub major: Option<String>,

    pub year: Option<AcademicYear>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MentorOnboardingRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub profession: String,

    #[validate(length(min = 1, max = 100))]
    pub domain: String,

    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMentorProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,

    #[validate(length(min = 5, max = 30))]
    pub phone: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub profession: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub domain: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMentorshipSessionRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub scheduled_date: NaiveDate,

    #[validate(custom(function = "validate_clock_time"))]
    pub scheduled_time: String,

    #[validate(range(min = 15, max = 480))]
    pub duration_minutes: u32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookMentorshipRequest {
    #[validate(length(min = 1))]
    pub mentor_id: String,

    #[serde(default = "default_booking_topic")]
    #[validate(length(min = 1, max = 200))]
    pub topic: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RedeemRequest {
    #[validate(length(min = 1, max = 64))]
    pub item_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentorSearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}
