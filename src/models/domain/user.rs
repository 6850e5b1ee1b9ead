use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Mentor,
}

impl UserRole {
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Student => "Student",
            UserRole::Mentor => "Mentor",
        }
    }
}

/// Account document in the `users` collection.
///
/// Fields added after the first release carry serde defaults so older
/// documents still load.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_id: Option<String>,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub onboarded: bool,
    #[serde(default)]
    pub xp: i64,
    #[serde(default)]
    pub unlocked_items: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: &str, email: &str) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            github_id: None,
            username: username.to_string(),
            email: email.to_string(),
            display_name: None,
            role: None,
            onboarded: false,
            xp: 0,
            unlocked_items: Vec::new(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_github(
        github_id: String,
        username: String,
        email: String,
        display_name: Option<String>,
    ) -> Self {
        User {
            github_id: Some(github_id),
            display_name,
            ..User::new(&username, &email)
        }
    }

    /// Never negative, even if a document was edited by hand.
    pub fn xp_balance(&self) -> u64 {
        self.xp.max(0) as u64
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str) -> Self {
        User::new(username, &format!("{}@example.com", username))
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }
}
