use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::domain::{ShopItem, User, UserRole},
    quiz::{
        AnswerOutcome, Category, Difficulty, GrowthSnapshot, QuizSessionController, QuizState,
    },
};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub role: Option<UserRole>,
    pub onboarded: bool,
    pub xp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            xp: user.xp_balance(),
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            role: user.role,
            onboarded: user.onboarded,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: Category,
    pub label: &'static str,
    pub icon: &'static str,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        CategoryView {
            id: category,
            label: category.label(),
            icon: category.icon(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub index: usize,
    pub prompt: String,
    pub answers: Vec<String>,
}

/// What a client may see of a quiz session. The correct answer is only
/// included once the current question has been answered.
#[derive(Debug, Clone, Serialize)]
pub struct QuizSessionView {
    pub state: QuizState,
    pub category: Category,
    pub difficulty: Difficulty,
    pub score: u32,
    pub current_index: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer: Option<String>,
    pub locked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revealed_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth: Option<GrowthSnapshot>,
}

impl QuizSessionView {
    pub fn from_controller(controller: &QuizSessionController) -> Self {
        let session = controller.session();
        let locked = session.is_locked();
        let question = session.current_question().map(|q| QuestionView {
            index: session.current_index(),
            prompt: q.prompt().to_string(),
            answers: q.answers().as_slice().to_vec(),
        });
        let revealed_answer = if locked {
            session.current_question().map(|q| q.correct_answer().to_string())
        } else {
            None
        };

        QuizSessionView {
            state: session.state(),
            category: controller.category(),
            difficulty: controller.difficulty(),
            score: session.score(),
            current_index: session.current_index(),
            total_questions: session.questions().len(),
            question,
            selected_answer: session.selected_answer().map(str::to_string),
            locked,
            revealed_answer,
            growth: None,
        }
    }

    /// Shown when no session exists yet.
    pub fn idle() -> Self {
        QuizSessionView {
            state: QuizState::Idle,
            category: Category::default(),
            difficulty: Difficulty::default(),
            score: 0,
            current_index: 0,
            total_questions: 0,
            question: None,
            selected_answer: None,
            locked: false,
            revealed_answer: None,
            growth: None,
        }
    }

    /// Shown while another request holds the session, e.g. during a fetch.
    pub fn busy() -> Self {
        QuizSessionView {
            state: QuizState::Loading,
            ..Self::idle()
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<AnswerOutcome>,
    pub session: QuizSessionView,
}

#[derive(Debug, Clone, Serialize)]
pub struct RewardsView {
    pub growth: GrowthSnapshot,
    pub unlocked_items: Vec<String>,
    pub shop: Vec<ShopItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RedemptionResponse {
    Granted { item_id: String, balance: i64 },
    Rejected { item_id: String, balance: i64, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_dto_hides_negative_xp() {
        let mut user = User::test_user("dto");
        user.xp = -5;
        let dto = UserDto::from(user);
        assert_eq!(dto.xp, 0);
        assert_eq!(dto.username, "dto");
    }

    #[test]
    fn idle_view_serializes_without_question() {
        let json = serde_json::to_value(QuizSessionView::idle()).unwrap();
        assert_eq!(json["state"], "idle");
        assert!(json.get("question").is_none());
        assert!(json.get("revealed_answer").is_none());
    }

    #[test]
    fn redemption_is_tagged_by_status() {
        let rejected = RedemptionResponse::Rejected {
            item_id: "twin_node".to_string(),
            balance: 100,
            message: "Insufficient XP in the Hive".to_string(),
        };
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["balance"], 100);
    }
}
