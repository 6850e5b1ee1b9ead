use std::sync::Arc;

use crate::{
    auth::{GithubOAuthClient, JwtService},
    config::Config,
    db::Database,
    errors::AppResult,
    quiz::OpenTdbProvider,
    repositories::{
        MentorshipRepository, MongoMentorshipRepository, MongoProfileRepository,
        MongoRewardLedger, MongoUserRepository, ProfileRepository, UserRepository,
    },
    services::{IdentityService, MentorshipService, QuizService, RewardService},
};

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<IdentityService>,
    pub quiz_service: Arc<QuizService>,
    pub reward_service: Arc<RewardService>,
    pub mentorship_service: Arc<MentorshipService>,
    pub jwt_service: Arc<JwtService>,
    pub github: Arc<GithubOAuthClient>,
    pub config: Arc<Config>,
    /// `None` when running against in-memory repositories.
    pub db: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;
        let profile_repository = Arc::new(MongoProfileRepository::new(&db));
        profile_repository.ensure_indexes().await?;
        let mentorship_repository = Arc::new(MongoMentorshipRepository::new(&db));
        mentorship_repository.ensure_indexes().await?;
        let ledger = Arc::new(MongoRewardLedger::new(&db));

        let provider = Arc::new(OpenTdbProvider::new(
            &config.trivia_base_url,
            config.trivia_timeout(),
        )?);

        Ok(Self {
            identity_service: Arc::new(IdentityService::new(
                user_repository.clone(),
                profile_repository.clone(),
            )),
            quiz_service: Arc::new(
                QuizService::new(provider, ledger.clone(), config.quiz_reveal_delay())
                    .with_idle_timeout(config.quiz_session_idle_timeout()),
            ),
            reward_service: Arc::new(RewardService::new(ledger, user_repository)),
            mentorship_service: Arc::new(MentorshipService::new(
                mentorship_repository,
                profile_repository,
            )),
            jwt_service: Arc::new(JwtService::new(
                &config.jwt_secret,
                config.jwt_expiration_hours,
                config.jwt_refresh_expiration_hours,
            )),
            github: Arc::new(GithubOAuthClient::new(&config)),
            config: Arc::new(config),
            db: Some(db),
        })
    }
}
