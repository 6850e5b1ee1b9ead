use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::IdentityContext,
    errors::AppError,
    quiz::{
        feedback::{LogFeedback, QuizFeedback},
        session::{AdvanceTicket, AnswerOutcome, Progress, QuizSession, QuizState},
        Category, DedupToken, Difficulty, QuestionQuery, TriviaError, TriviaProvider,
    },
    repositories::RewardLedger,
};

#[derive(Debug, Clone, Error)]
pub enum QuizError {
    #[error("quiz session is {0:?}; finish or reset it first")]
    Busy(QuizState),
    #[error(transparent)]
    Trivia(#[from] TriviaError),
    #[error("failed to record session reward: {0}")]
    Ledger(#[from] AppError),
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::Busy(_) => AppError::Conflict(err.to_string()),
            QuizError::Trivia(e) => AppError::TriviaUnavailable(e.user_message().to_string()),
            QuizError::Ledger(e) => e,
        }
    }
}

/// Drives one player's trivia session: parameter selection, fetching,
/// answering, and reporting the final score to the reward ledger.
pub struct QuizSessionController {
    provider: Arc<dyn TriviaProvider>,
    ledger: Arc<dyn RewardLedger>,
    feedback: Arc<dyn QuizFeedback>,
    identity: Option<IdentityContext>,
    category: Category,
    difficulty: Difficulty,
    token: Option<DedupToken>,
    session: QuizSession,
    reported: bool,
}

impl QuizSessionController {
    pub fn new(
        provider: Arc<dyn TriviaProvider>,
        ledger: Arc<dyn RewardLedger>,
        identity: Option<IdentityContext>,
    ) -> Self {
        Self {
            provider,
            ledger,
            feedback: Arc::new(LogFeedback),
            identity,
            category: Category::default(),
            difficulty: Difficulty::default(),
            token: None,
            session: QuizSession::new(),
            reported: false,
        }
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn QuizFeedback>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn token(&self) -> Option<&DedupToken> {
        self.token.as_ref()
    }

    pub fn identity(&self) -> Option<&IdentityContext> {
        self.identity.as_ref()
    }

    /// Whether the finished session's score has reached the ledger.
    pub fn is_reported(&self) -> bool {
        self.reported
    }

    pub fn configure(&mut self, category: Category, difficulty: Difficulty) -> Result<(), QuizError> {
        if !self.session.can_start() {
            return Err(QuizError::Busy(self.session.state()));
        }
        self.category = category;
        self.difficulty = difficulty;
        Ok(())
    }

    /// Fetches a fresh set of questions. Any failure returns the session to
    /// `Idle`; nothing is retried.
    ///
    /// A finished run whose score has not reached the ledger yet is credited
    /// first. If that still fails, the old run is kept and nothing starts.
    pub async fn start(&mut self) -> Result<(), QuizError> {
        self.report_score().await?;
        if !self.session.mark_loading() {
            return Err(QuizError::Busy(self.session.state()));
        }
        self.reported = false;

        match self.load_questions().await {
            Ok(questions) => {
                log::info!(
                    "Quiz session started: {} questions, {} / {}",
                    questions.len(),
                    self.category,
                    self.difficulty
                );
                self.session.load(questions);
                Ok(())
            }
            Err(err) => {
                log::warn!("Quiz session could not start: {}", err);
                if err.invalidates_token() {
                    self.token = None;
                }
                self.session.abort_loading();
                Err(err.into())
            }
        }
    }

    async fn load_questions(&mut self) -> Result<Vec<crate::quiz::Question>, TriviaError> {
        if self.token.is_none() {
            self.token = Some(self.provider.request_token().await?);
        }
        let query = QuestionQuery::new(self.category, self.difficulty, self.token.clone());
        self.provider.fetch_questions(&query).await
    }

    /// Scores `choice` for the open question and locks input until `advance`.
    /// Duplicate or out-of-turn submissions return `None` and change nothing.
    pub fn submit_answer(&mut self, choice: &str) -> Option<AnswerOutcome> {
        let Some(outcome) = self.session.submit(choice) else {
            log::debug!("Ignored answer submission in state {:?}", self.session.state());
            return None;
        };

        if outcome.correct {
            self.feedback.reward(outcome.points_awarded, outcome.score);
        } else {
            self.feedback.failure(&outcome.correct_answer);
        }
        Some(outcome)
    }

    /// Moves past the answered question once the reveal delay has elapsed.
    /// Reaching the end reports the score to the ledger.
    pub async fn advance(&mut self, ticket: AdvanceTicket) -> Result<Option<Progress>, QuizError> {
        let progress = self.session.advance(ticket);
        if let Some(Progress::Finished { score }) = progress {
            log::info!("Quiz session finished with {} XP", score);
            self.report_score().await?;
        }
        Ok(progress)
    }

    /// Credits the finished session's score once. Anonymous sessions earn nothing.
    /// Safe to call at any time; it does nothing unless a score is owed.
    pub async fn report_score(&mut self) -> Result<(), QuizError> {
        if self.reported || self.session.state() != QuizState::Finished {
            return Ok(());
        }
        let Some(identity) = &self.identity else {
            log::debug!("Anonymous quiz session finished; no reward recorded");
            self.reported = true;
            return Ok(());
        };

        let score = self.session.score();
        if score > 0 {
            let total = self.ledger.award(&identity.user_id, score).await?;
            log::info!("Credited {} XP to {} (total {})", score, identity.user_id, total);
        }
        self.reported = true;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.reported = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::user::UserRole,
        quiz::trivia::MockTriviaProvider,
        test_utils::fixtures::{sample_questions, MemoryLedger, StaticTriviaProvider},
    };
    use std::sync::Mutex;

    fn identity() -> IdentityContext {
        IdentityContext {
            user_id: "user-1".to_string(),
            username: "scholar".to_string(),
            role: Some(UserRole::Student),
        }
    }

    fn controller(ledger: Arc<MemoryLedger>) -> QuizSessionController {
        QuizSessionController::new(
            Arc::new(StaticTriviaProvider::new(sample_questions(5))),
            ledger,
            Some(identity()),
        )
    }

    async fn play(ctl: &mut QuizSessionController, correct_pattern: &[bool]) {
        for &answer_correctly in correct_pattern {
            let question = ctl.session().current_question().unwrap().clone();
            let choice = if answer_correctly {
                question.correct_answer().to_string()
            } else {
                question.distractors()[0].clone()
            };
            let outcome = ctl.submit_answer(&choice).unwrap();
            ctl.advance(outcome.ticket).await.unwrap();
        }
    }

    #[tokio::test]
    async fn all_correct_scores_500_and_credits_ledger() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = controller(ledger.clone());

        ctl.start().await.unwrap();
        play(&mut ctl, &[true; 5]).await;

        assert_eq!(ctl.session().state(), QuizState::Finished);
        assert_eq!(ctl.session().score(), 500);
        assert!(ctl.is_reported());
        assert_eq!(ledger.total("user-1"), 500);
    }

    #[tokio::test]
    async fn failed_credit_is_retried_before_the_next_run() {
        let ledger = Arc::new(MemoryLedger::default().fail_next_awards(1));
        let mut ctl = controller(ledger.clone());
        ctl.start().await.unwrap();

        let mut last = Ok(None);
        for _ in 0..5 {
            let correct = ctl.session().current_question().unwrap().correct_answer().to_string();
            let outcome = ctl.submit_answer(&correct).unwrap();
            last = ctl.advance(outcome.ticket).await;
        }

        assert!(matches!(last, Err(QuizError::Ledger(_))));
        assert_eq!(ctl.session().state(), QuizState::Finished);
        assert!(!ctl.is_reported());
        assert_eq!(ledger.total("user-1"), 0);

        ctl.start().await.unwrap();
        assert_eq!(ledger.total("user-1"), 500);
        assert_eq!(ctl.session().state(), QuizState::Playing);
        assert_eq!(ctl.session().score(), 0);
    }

    #[tokio::test]
    async fn start_keeps_finished_run_while_ledger_is_down() {
        let ledger = Arc::new(MemoryLedger::default().fail_next_awards(2));
        let mut ctl = controller(ledger.clone());
        ctl.start().await.unwrap();
        for _ in 0..5 {
            let correct = ctl.session().current_question().unwrap().correct_answer().to_string();
            let outcome = ctl.submit_answer(&correct).unwrap();
            let _ = ctl.advance(outcome.ticket).await;
        }

        assert!(matches!(ctl.start().await, Err(QuizError::Ledger(_))));
        assert_eq!(ctl.session().state(), QuizState::Finished);
        assert_eq!(ctl.session().score(), 500);

        ctl.report_score().await.unwrap();
        assert_eq!(ledger.total("user-1"), 500);
        ctl.report_score().await.unwrap();
        assert_eq!(ledger.total("user-1"), 500);
    }

    #[tokio::test]
    async fn all_wrong_still_finishes_with_zero() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = controller(ledger.clone());

        ctl.start().await.unwrap();
        play(&mut ctl, &[false; 5]).await;

        assert_eq!(ctl.session().state(), QuizState::Finished);
        assert_eq!(ctl.session().score(), 0);
        assert_eq!(ledger.total("user-1"), 0);
    }

    #[tokio::test]
    async fn score_is_100_per_correct_and_never_decreases() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = controller(ledger);
        ctl.start().await.unwrap();

        let pattern = [true, false, true, true, false];
        let mut last = 0;
        let mut correct = 0;
        for &right in &pattern {
            let q = ctl.session().current_question().unwrap().clone();
            let choice = if right { q.correct_answer().to_string() } else { q.distractors()[1].clone() };
            let outcome = ctl.submit_answer(&choice).unwrap();
            if right {
                correct += 1;
            }
            assert!(outcome.score >= last);
            assert_eq!(outcome.score, 100 * correct);
            last = outcome.score;
            ctl.advance(outcome.ticket).await.unwrap();
        }
        assert_eq!(ctl.session().score(), 300);
    }

    #[tokio::test]
    async fn double_submit_is_idempotent() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = controller(ledger);
        ctl.start().await.unwrap();

        let correct = ctl.session().current_question().unwrap().correct_answer().to_string();
        assert!(ctl.submit_answer(&correct).is_some());
        assert!(ctl.submit_answer(&correct).is_none());
        assert_eq!(ctl.session().score(), 100);
    }

    #[tokio::test]
    async fn answer_order_is_stable_while_playing() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = controller(ledger);
        ctl.start().await.unwrap();

        let first = ctl.session().current_question().unwrap().answers().clone();
        for _ in 0..5 {
            assert_eq!(ctl.session().current_question().unwrap().answers(), &first);
        }
    }

    #[tokio::test]
    async fn token_is_requested_once_and_reused() {
        let mut provider = MockTriviaProvider::new();
        provider
            .expect_request_token()
            .times(1)
            .returning(|| Ok(DedupToken::new("tok-1")));
        provider
            .expect_fetch_questions()
            .withf(|q| q.token.as_ref().map(|t| t.as_str()) == Some("tok-1") && q.amount == 5)
            .times(2)
            .returning(|_| Ok(sample_questions(5)));

        let mut ctl = QuizSessionController::new(
            Arc::new(provider),
            Arc::new(MemoryLedger::default()),
            Some(identity()),
        );

        ctl.start().await.unwrap();
        ctl.reset();
        ctl.start().await.unwrap();
        assert_eq!(ctl.token().map(|t| t.as_str()), Some("tok-1"));
    }

    #[tokio::test]
    async fn empty_pool_fails_closed_to_idle() {
        let mut provider = MockTriviaProvider::new();
        provider
            .expect_request_token()
            .returning(|| Ok(DedupToken::new("tok-1")));
        provider
            .expect_fetch_questions()
            .times(1)
            .returning(|_| Err(TriviaError::NoResults));

        let mut ctl = QuizSessionController::new(
            Arc::new(provider),
            Arc::new(MemoryLedger::default()),
            Some(identity()),
        );

        let err = ctl.start().await.unwrap_err();
        assert!(matches!(err, QuizError::Trivia(TriviaError::NoResults)));
        assert_eq!(ctl.session().state(), QuizState::Idle);
        assert!(ctl.token().is_some());
        assert!(ctl.submit_answer("anything").is_none());
    }

    #[tokio::test]
    async fn exhausted_token_is_discarded() {
        let mut provider = MockTriviaProvider::new();
        provider
            .expect_request_token()
            .returning(|| Ok(DedupToken::new("tok-1")));
        provider
            .expect_fetch_questions()
            .returning(|_| Err(TriviaError::TokenExhausted));

        let mut ctl = QuizSessionController::new(
            Arc::new(provider),
            Arc::new(MemoryLedger::default()),
            None,
        );

        assert!(ctl.start().await.is_err());
        assert!(ctl.token().is_none());
        assert_eq!(ctl.session().state(), QuizState::Idle);
    }

    #[tokio::test]
    async fn token_failure_fails_closed() {
        let mut provider = MockTriviaProvider::new();
        provider
            .expect_request_token()
            .returning(|| Err(TriviaError::Transport("connection refused".into())));
        provider.expect_fetch_questions().never();

        let mut ctl = QuizSessionController::new(
            Arc::new(provider),
            Arc::new(MemoryLedger::default()),
            None,
        );

        let err: AppError = ctl.start().await.unwrap_err().into();
        assert!(matches!(err, AppError::TriviaUnavailable(_)));
        assert_eq!(ctl.session().state(), QuizState::Idle);
    }

    #[tokio::test]
    async fn configure_is_refused_mid_game() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = controller(ledger);
        ctl.configure(Category::History, Difficulty::Hard).unwrap();
        ctl.start().await.unwrap();

        assert!(matches!(
            ctl.configure(Category::Math, Difficulty::Easy),
            Err(QuizError::Busy(QuizState::Playing))
        ));
        assert_eq!(ctl.category(), Category::History);
        assert_eq!(ctl.difficulty(), Difficulty::Hard);
    }

    #[tokio::test]
    async fn anonymous_sessions_finish_without_credit() {
        let ledger = Arc::new(MemoryLedger::default());
        let mut ctl = QuizSessionController::new(
            Arc::new(StaticTriviaProvider::new(sample_questions(5))),
            ledger.clone(),
            None,
        );

        ctl.start().await.unwrap();
        play(&mut ctl, &[true; 5]).await;

        assert_eq!(ctl.session().score(), 500);
        assert!(ledger.is_empty());
    }

    #[derive(Default)]
    struct RecordingFeedback {
        events: Mutex<Vec<String>>,
    }

    impl QuizFeedback for RecordingFeedback {
        fn reward(&self, points: u32, _score: u32) {
            self.events.lock().unwrap().push(format!("reward:{}", points));
        }

        fn failure(&self, correct_answer: &str) {
            self.events.lock().unwrap().push(format!("failure:{}", correct_answer));
        }
    }

    #[tokio::test]
    async fn feedback_reveals_correct_answer_on_mistakes() {
        let feedback = Arc::new(RecordingFeedback::default());
        let mut ctl = controller(Arc::new(MemoryLedger::default())).with_feedback(feedback.clone());
        ctl.start().await.unwrap();

        let q = ctl.session().current_question().unwrap().clone();
        let outcome = ctl.submit_answer(&q.distractors()[0]).unwrap();
        ctl.advance(outcome.ticket).await.unwrap();
        let q2 = ctl.session().current_question().unwrap().clone();
        ctl.submit_answer(q2.correct_answer()).unwrap();

        let events = feedback.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![format!("failure:{}", q.correct_answer()), "reward:100".to_string()]
        );
    }
}
