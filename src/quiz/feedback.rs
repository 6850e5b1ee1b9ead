/// Receives the reward/failure signals raised when an answer is scored.
///
/// Clients render these as coin animations, sounds or toasts; the server side
/// only logs them.
pub trait QuizFeedback: Send + Sync {
    fn reward(&self, points: u32, score: u32);
    fn failure(&self, correct_answer: &str);
}

pub struct LogFeedback;

impl QuizFeedback for LogFeedback {
    fn reward(&self, points: u32, score: u32) {
        log::info!("Correct answer: +{} XP (session score {})", points, score);
    }

    fn failure(&self, correct_answer: &str) {
        log::info!("Incorrect answer, correct was '{}'", correct_answer);
    }
}
