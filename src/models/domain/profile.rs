use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum AcademicYear {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
}

/// Onboarding profile in the `students` collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StudentProfile {
    pub user_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<AcademicYear>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarded_at: Option<DateTime<Utc>>,
}

/// Onboarding profile in the `mentors` collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MentorProfile {
    pub user_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl MentorProfile {
    /// Case-insensitive match on name, profession or domain.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [
            Some(self.full_name.as_str()),
            self.profession.as_deref(),
            self.domain.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}
