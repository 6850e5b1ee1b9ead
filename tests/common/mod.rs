#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::RwLock;

use eduhive_server::{
    auth::IdentityContext,
    errors::{AppError, AppResult},
    models::domain::{MentorProfile, MentorshipSession, StudentProfile, User, UserRole},
    quiz::{DedupToken, Question, QuestionQuery, TriviaError, TriviaProvider},
    repositories::{MentorshipRepository, ProfileRepository, RewardLedger, UserRepository},
};

/// Users plus their xp, shared by the user repository and the ledger views.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, user: User) -> User {
        self.users.write().await.insert(user.id.clone(), user.clone());
        user
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("User with id '{}' not found", id))
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == user.username) {
            return Err(AppError::AlreadyExists(format!(
                "User '{}' already exists",
                user.username
            )));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_github_id(&self, github_id: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.github_id.as_deref() == Some(github_id))
            .cloned())
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(not_found(&user.id)),
        }
    }

    async fn set_role_if_unset(&self, id: &str, role: UserRole) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        match users.get_mut(id) {
            Some(user) if user.role.is_none() => {
                user.role = Some(role);
                Ok(Some(user.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn mark_onboarded(&self, id: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or_else(|| not_found(id))?;
        user.onboarded = true;
        Ok(())
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl RewardLedger for InMemoryUserRepository {
    async fn award(&self, user_id: &str, points: u32) -> AppResult<i64> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| not_found(user_id))?;
        user.xp += points as i64;
        Ok(user.xp)
    }

    async fn balance(&self, user_id: &str) -> AppResult<i64> {
        let users = self.users.read().await;
        users.get(user_id).map(|u| u.xp).ok_or_else(|| not_found(user_id))
    }

    async fn spend(&self, user_id: &str, cost: i64, item: &str) -> AppResult<Option<i64>> {
        let mut users = self.users.write().await;
        let user = users.get_mut(user_id).ok_or_else(|| not_found(user_id))?;
        if user.xp < cost {
            return Ok(None);
        }
        user.xp -= cost;
        if !user.unlocked_items.iter().any(|i| i == item) {
            user.unlocked_items.push(item.to_string());
        }
        Ok(Some(user.xp))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    students: Arc<RwLock<HashMap<String, StudentProfile>>>,
    mentors: Arc<RwLock<HashMap<String, MentorProfile>>>,
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert_student(&self, profile: StudentProfile) -> AppResult<StudentProfile> {
        self.students
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn find_student(&self, user_id: &str) -> AppResult<Option<StudentProfile>> {
        Ok(self.students.read().await.get(user_id).cloned())
    }

    async fn upsert_mentor(&self, profile: MentorProfile) -> AppResult<MentorProfile> {
        self.mentors
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn find_mentor(&self, user_id: &str) -> AppResult<Option<MentorProfile>> {
        Ok(self.mentors.read().await.get(user_id).cloned())
    }

    async fn list_mentors(&self) -> AppResult<Vec<MentorProfile>> {
        let mut mentors: Vec<_> = self.mentors.read().await.values().cloned().collect();
        mentors.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(mentors)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryMentorshipRepository {
    sessions: Arc<RwLock<Vec<MentorshipSession>>>,
}

#[async_trait]
impl MentorshipRepository for InMemoryMentorshipRepository {
    async fn create(&self, session: MentorshipSession) -> AppResult<MentorshipSession> {
        self.sessions.write().await.push(session.clone());
        Ok(session)
    }

    async fn list_by_mentor(&self, mentor_id: &str) -> AppResult<Vec<MentorshipSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.iter().filter(|s| s.mentor_id == mentor_id).cloned().collect())
    }

    async fn list_by_student(&self, student_id: &str) -> AppResult<Vec<MentorshipSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .iter()
            .filter(|s| s.student_id.as_deref() == Some(student_id))
            .cloned()
            .collect())
    }

    async fn list_upcoming(&self) -> AppResult<Vec<MentorshipSession>> {
        use eduhive_server::models::domain::{MentorshipKind, MentorshipStatus};

        let sessions = self.sessions.read().await;
        let mut upcoming: Vec<_> = sessions
            .iter()
            .filter(|s| s.kind == MentorshipKind::Broadcast && s.status == MentorshipStatus::Upcoming)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.scheduled_date.cmp(&b.scheduled_date));
        Ok(upcoming)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Serves a fixed question set; `fail_with` makes every fetch fail.
pub struct FixedTriviaProvider {
    questions: Vec<Question>,
    fail_with: Option<TriviaError>,
}

impl FixedTriviaProvider {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            fail_with: None,
        }
    }

    pub fn failing(error: TriviaError) -> Self {
        Self {
            questions: Vec::new(),
            fail_with: Some(error),
        }
    }
}

#[async_trait]
impl TriviaProvider for FixedTriviaProvider {
    async fn request_token(&self) -> Result<DedupToken, TriviaError> {
        Ok(DedupToken::new("fixed-token"))
    }

    async fn fetch_questions(&self, _query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(self.questions.clone()),
        }
    }
}

pub fn questions(count: usize) -> Vec<Question> {
    let mut rng = StdRng::seed_from_u64(11);
    (0..count)
        .map(|i| {
            Question::new(
                format!("Question {}?", i + 1),
                format!("correct {}", i),
                vec![
                    format!("wrong {} a", i),
                    format!("wrong {} b", i),
                    format!("wrong {} c", i),
                ],
                &mut rng,
            )
        })
        .collect()
}

pub fn identity_of(user: &User) -> IdentityContext {
    IdentityContext::from(user)
}
