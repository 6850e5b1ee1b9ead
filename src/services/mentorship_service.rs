use std::sync::Arc;

use chrono::NaiveDate;
use validator::Validate;

use crate::{
    auth::{require_role, IdentityContext},
    errors::{AppError, AppResult},
    models::{
        domain::{MentorshipSession, UserRole},
        dto::request::{BookMentorshipRequest, CreateMentorshipSessionRequest},
    },
    repositories::{MentorshipRepository, ProfileRepository},
};

pub struct MentorshipService {
    sessions: Arc<dyn MentorshipRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl MentorshipService {
    pub fn new(sessions: Arc<dyn MentorshipRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { sessions, profiles }
    }

    /// Mentor broadcasts a session. `today` is the caller's current date.
    pub async fn create_session(
        &self,
        identity: &IdentityContext,
        request: CreateMentorshipSessionRequest,
        today: NaiveDate,
    ) -> AppResult<MentorshipSession> {
        request.validate()?;
        require_role(identity, UserRole::Mentor)?;

        if request.scheduled_date < today {
            return Err(AppError::ValidationError(
                "Cannot schedule a session in the past".to_string(),
            ));
        }

        let mentor_email = self
            .profiles
            .find_mentor(&identity.user_id)
            .await?
            .and_then(|p| p.email);

        let session = MentorshipSession::broadcast(
            &identity.user_id,
            mentor_email,
            request.title,
            request.description,
            request.scheduled_date,
            request.scheduled_time,
            request.duration_minutes,
        );
        log::info!(
            "Mentor {} scheduled session {} on {}",
            identity.user_id,
            session.id,
            request.scheduled_date
        );
        self.sessions.create(session).await
    }

    pub async fn request_booking(
        &self,
        identity: &IdentityContext,
        request: BookMentorshipRequest,
    ) -> AppResult<MentorshipSession> {
        request.validate()?;
        require_role(identity, UserRole::Student)?;

        let mentor = self
            .profiles
            .find_mentor(&request.mentor_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Mentor '{}' not found", request.mentor_id)))?;

        let student_name = match self.profiles.find_student(&identity.user_id).await? {
            Some(profile) if !profile.full_name.is_empty() => profile.full_name,
            _ => identity.username.clone(),
        };

        let booking = MentorshipSession::booking(
            &mentor.user_id,
            &identity.user_id,
            &student_name,
            request.topic,
        );
        log::info!(
            "Student {} requested mentorship from {}",
            identity.user_id,
            mentor.user_id
        );
        self.sessions.create(booking).await
    }

    pub async fn sessions_for_mentor(&self, identity: &IdentityContext) -> AppResult<Vec<MentorshipSession>> {
        require_role(identity, UserRole::Mentor)?;
        self.sessions.list_by_mentor(&identity.user_id).await
    }

    pub async fn requests_for_student(&self, identity: &IdentityContext) -> AppResult<Vec<MentorshipSession>> {
        require_role(identity, UserRole::Student)?;
        self.sessions.list_by_student(&identity.user_id).await
    }

    pub async fn upcoming(&self) -> AppResult<Vec<MentorshipSession>> {
        self.sessions.list_upcoming().await
    }
}
