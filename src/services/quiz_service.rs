use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};
use validator::Validate;

use crate::{
    auth::IdentityContext,
    errors::{AppError, AppResult},
    models::dto::{
        request::{StartQuizRequest, SubmitAnswerRequest},
        response::{CategoryView, QuizSessionView, SubmitAnswerResponse},
    },
    quiz::{
        AdvanceTicket, Category, GrowthModel, QuizSessionController, QuizState, TriviaProvider,
    },
    repositories::RewardLedger,
};

type SessionHandle = Arc<Mutex<QuizSessionController>>;

/// Sessions untouched for this long are dropped on the next sweep.
pub const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

struct SessionSlot {
    handle: SessionHandle,
    touched: Instant,
}

/// Keeps one quiz controller per signed-in user and schedules the pause
/// between revealing an answer and moving on.
pub struct QuizService {
    provider: Arc<dyn TriviaProvider>,
    ledger: Arc<dyn RewardLedger>,
    growth: GrowthModel,
    reveal_delay: Duration,
    idle_timeout: Duration,
    sessions: RwLock<HashMap<String, SessionSlot>>,
}

impl QuizService {
    /// A zero `reveal_delay` advances as part of the submit request.
    pub fn new(
        provider: Arc<dyn TriviaProvider>,
        ledger: Arc<dyn RewardLedger>,
        reveal_delay: Duration,
    ) -> Self {
        Self {
            provider,
            ledger,
            growth: GrowthModel::default(),
            reveal_delay,
            idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn categories(&self) -> Vec<CategoryView> {
        Category::ALL.into_iter().map(CategoryView::from).collect()
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn existing(&self, user_id: &str) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(user_id)?;
        slot.touched = Instant::now();
        Some(Arc::clone(&slot.handle))
    }

    async fn session_for(&self, identity: &IdentityContext) -> SessionHandle {
        if let Some(handle) = self.existing(&identity.user_id).await {
            return handle;
        }

        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions, self.idle_timeout);
        let slot = sessions
            .entry(identity.user_id.clone())
            .or_insert_with(|| SessionSlot {
                handle: Arc::new(Mutex::new(QuizSessionController::new(
                    Arc::clone(&self.provider),
                    Arc::clone(&self.ledger),
                    Some(identity.clone()),
                ))),
                touched: Instant::now(),
            });
        slot.touched = Instant::now();
        Arc::clone(&slot.handle)
    }

    /// Drops sessions idle past `idle_timeout`. A session stays while a request
    /// or a pending advance holds it, or while its score is still owed to the
    /// ledger.
    fn sweep(sessions: &mut HashMap<String, SessionSlot>, idle_timeout: Duration) {
        let before = sessions.len();
        sessions.retain(|_, slot| {
            if slot.touched.elapsed() < idle_timeout {
                return true;
            }
            match slot.handle.try_lock() {
                Ok(controller) => {
                    controller.session().state() == QuizState::Finished
                        && !controller.is_reported()
                }
                Err(_) => true,
            }
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            log::debug!("Evicted {} idle quiz sessions", evicted);
        }
    }

    /// Evicts idle sessions and returns how many remain.
    pub async fn sweep_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::sweep(&mut sessions, self.idle_timeout);
        sessions.len()
    }

    fn busy() -> AppError {
        AppError::Conflict("The quiz is busy with another request".to_string())
    }

    pub async fn start(
        &self,
        identity: &IdentityContext,
        request: StartQuizRequest,
    ) -> AppResult<QuizSessionView> {
        let handle = self.session_for(identity).await;
        let mut controller = handle.try_lock().map_err(|_| Self::busy())?;

        if controller.session().state() == QuizState::Playing {
            log::info!("Abandoning unfinished quiz for {}", identity.user_id);
            controller.reset();
        }

        controller.configure(request.category, request.difficulty)?;
        controller.start().await?;

        Ok(QuizSessionView::from_controller(&controller))
    }

    pub async fn submit(
        &self,
        identity: &IdentityContext,
        request: SubmitAnswerRequest,
    ) -> AppResult<SubmitAnswerResponse> {
        request.validate()?;

        let handle = self
            .existing(&identity.user_id)
            .await
            .ok_or_else(|| AppError::NotFound("No active quiz session".to_string()))?;
        let mut controller = handle.try_lock().map_err(|_| Self::busy())?;
        controller.report_score().await?;

        let outcome = controller.submit_answer(&request.answer);
        if let Some(outcome) = &outcome {
            if self.reveal_delay.is_zero() {
                controller.advance(outcome.ticket).await?;
            } else {
                self.schedule_advance(Arc::clone(&handle), outcome.ticket);
            }
        }

        let mut session = QuizSessionView::from_controller(&controller);
        drop(controller);
        self.attach_growth(identity, &mut session).await?;

        Ok(SubmitAnswerResponse {
            accepted: outcome.is_some(),
            outcome,
            session,
        })
    }

    fn schedule_advance(&self, handle: SessionHandle, ticket: AdvanceTicket) {
        let delay = self.reveal_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut controller = handle.lock().await;
            if let Err(e) = controller.advance(ticket).await {
                log::warn!("Quiz advance failed, credit will be retried: {}", e);
            }
        });
    }

    pub async fn view(&self, identity: &IdentityContext) -> AppResult<QuizSessionView> {
        let Some(handle) = self.existing(&identity.user_id).await else {
            return Ok(QuizSessionView::idle());
        };

        let mut session = match handle.try_lock() {
            Ok(mut controller) => {
                controller.report_score().await?;
                QuizSessionView::from_controller(&controller)
            }
            Err(_) => QuizSessionView::busy(),
        };
        self.attach_growth(identity, &mut session).await?;
        Ok(session)
    }

    /// Finished sessions show where the new total sits on the growth ladder.
    async fn attach_growth(
        &self,
        identity: &IdentityContext,
        session: &mut QuizSessionView,
    ) -> AppResult<()> {
        if session.state == QuizState::Finished {
            let xp = self.ledger.balance(&identity.user_id).await?;
            session.growth = Some(self.growth.snapshot(xp.max(0) as u64));
        }
        Ok(())
    }

    pub async fn reset(&self, identity: &IdentityContext) {
        let removed = self.sessions.write().await.remove(&identity.user_id);
        if let Some(slot) = removed {
            // Invalidates any advance still waiting on the reveal delay
            let mut controller = slot.handle.lock().await;
            if let Err(e) = controller.report_score().await {
                log::warn!("Dropping uncredited quiz score for {}: {}", identity.user_id, e);
            }
            controller.reset();
            log::info!("Quiz session reset for {}", identity.user_id);
        }
    }
}
