use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipKind {
    /// Scheduled by a mentor and open to attendees.
    Broadcast,
    /// Raised by a student asking a mentor for one-on-one time.
    Booking,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorshipStatus {
    Upcoming,
    Pending,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MentorshipSession {
    pub id: String,
    pub kind: MentorshipKind,
    pub status: MentorshipStatus,
    pub mentor_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mentor_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub attendees: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MentorshipSession {
    #[allow(clippy::too_many_arguments)]
    pub fn broadcast(
        mentor_id: &str,
        mentor_email: Option<String>,
        title: String,
        description: Option<String>,
        scheduled_date: NaiveDate,
        scheduled_time: String,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: MentorshipKind::Broadcast,
            status: MentorshipStatus::Upcoming,
            mentor_id: mentor_id.to_string(),
            mentor_email,
            student_id: None,
            student_name: None,
            title,
            description,
            scheduled_date: Some(scheduled_date),
            scheduled_time: Some(scheduled_time),
            duration_minutes: Some(duration_minutes),
            attendees: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn booking(mentor_id: &str, student_id: &str, student_name: &str, topic: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: MentorshipKind::Booking,
            status: MentorshipStatus::Pending,
            mentor_id: mentor_id.to_string(),
            mentor_email: None,
            student_id: Some(student_id.to_string()),
            student_name: Some(student_name.to_string()),
            title: topic,
            description: None,
            scheduled_date: None,
            scheduled_time: None,
            duration_minutes: None,
            attendees: Vec::new(),
            created_at: Utc::now(),
        }
    }
}
