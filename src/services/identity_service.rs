use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    auth::{require_role, GithubProfile, IdentityContext},
    errors::{AppError, AppResult},
    models::{
        domain::{MentorProfile, StudentProfile, User, UserRole},
        dto::request::{MentorOnboardingRequest, StudentOnboardingRequest, UpdateMentorProfileRequest},
    },
    repositories::{ProfileRepository, UserRepository},
};

/// Accounts, the one-role-per-account rule, and role-specific onboarding.
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { users, profiles }
    }

    /// Creates the account on first sign-in; later sign-ins refresh the
    /// GitHub-sourced fields and keep role, xp and onboarding state.
    pub async fn upsert_oauth_user(&self, profile: GithubProfile) -> AppResult<User> {
        match self.users.find_by_github_id(&profile.github_id).await? {
            Some(mut existing) => {
                existing.username = profile.login;
                existing.email = profile.email;
                existing.display_name = profile.name;
                self.users.update(existing).await
            }
            None => {
                let user = User::from_github(
                    profile.github_id,
                    profile.login,
                    profile.email,
                    profile.name,
                );
                log::info!("Creating account for GitHub user {}", user.username);
                self.users.create(user).await
            }
        }
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", user_id)))
    }

    /// Roles are permanent. Re-selecting the current role is a no-op.
    pub async fn assign_role(&self, user_id: &str, role: UserRole) -> AppResult<User> {
        if let Some(user) = self.users.set_role_if_unset(user_id, role).await? {
            log::info!("User {} registered as {}", user_id, role.label());
            return Ok(user);
        }

        let user = self.get_user(user_id).await?;
        match user.role {
            Some(current) if current == role => Ok(user),
            Some(current) => Err(AppError::Conflict(format!(
                "This account is already registered as a {}",
                current.label()
            ))),
            None => Err(AppError::InternalError(format!(
                "Role update for user '{}' did not apply",
                user_id
            ))),
        }
    }

    async fn user_with_role(&self, user_id: &str, role: UserRole) -> AppResult<User> {
        let user = self.get_user(user_id).await?;
        require_role(&IdentityContext::from(&user), role)?;
        Ok(user)
    }

    pub async fn onboard_student(
        &self,
        identity: &IdentityContext,
        request: StudentOnboardingRequest,
    ) -> AppResult<StudentProfile> {
        request.validate()?;
        let user = self.user_with_role(&identity.user_id, UserRole::Student).await?;

        let profile = self
            .profiles
            .upsert_student(StudentProfile {
                user_id: user.id.clone(),
                full_name: request.full_name,
                email: Some(user.email.clone()),
                institution: request.institution,
                major: request.major,
                year: request.year,
                onboarded_at: Some(Utc::now()),
            })
            .await?;
        self.users.mark_onboarded(&user.id).await?;

        log::info!("Student {} completed onboarding", user.id);
        Ok(profile)
    }

    pub async fn onboard_mentor(
        &self,
        identity: &IdentityContext,
        request: MentorOnboardingRequest,
    ) -> AppResult<MentorProfile> {
        request.validate()?;
        let user = self.user_with_role(&identity.user_id, UserRole::Mentor).await?;

        let now = Utc::now();
        let profile = self
            .profiles
            .upsert_mentor(MentorProfile {
                user_id: user.id.clone(),
                full_name: request.full_name,
                email: Some(user.email.clone()),
                phone: request.phone,
                profession: Some(request.profession),
                domain: Some(request.domain),
                language: request.language,
                created_at: Some(now),
                modified_at: Some(now),
            })
            .await?;
        self.users.mark_onboarded(&user.id).await?;

        log::info!("Mentor {} completed onboarding", user.id);
        Ok(profile)
    }

    pub async fn update_mentor_profile(
        &self,
        identity: &IdentityContext,
        request: UpdateMentorProfileRequest,
    ) -> AppResult<MentorProfile> {
        request.validate()?;
        self.user_with_role(&identity.user_id, UserRole::Mentor).await?;

        let mut profile = self
            .profiles
            .find_mentor(&identity.user_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound("Mentor profile not found; complete onboarding first".to_string())
            })?;

        if let Some(full_name) = request.full_name {
            profile.full_name = full_name;
        }
        profile.phone = request.phone.or(profile.phone);
        profile.profession = request.profession.or(profile.profession);
        profile.domain = request.domain.or(profile.domain);
        profile.language = request.language.or(profile.language);
        profile.modified_at = Some(Utc::now());

        self.profiles.upsert_mentor(profile).await
    }

    pub async fn student_profile(&self, user_id: &str) -> AppResult<StudentProfile> {
        self.profiles
            .find_student(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))
    }

    pub async fn mentor_profile(&self, user_id: &str) -> AppResult<MentorProfile> {
        self.profiles
            .find_mentor(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Mentor profile not found".to_string()))
    }

    pub async fn list_mentors(&self, search: Option<&str>) -> AppResult<Vec<MentorProfile>> {
        let mentors = self.profiles.list_mentors().await?;
        Ok(match search {
            Some(needle) => mentors.into_iter().filter(|m| m.matches(needle)).collect(),
            None => mentors,
        })
    }
}
