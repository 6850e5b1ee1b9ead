//! Trivia session engine: question sets from an external provider, scoring,
//! and the growth ladder that turns experience points into stages.

pub mod category;
pub mod controller;
pub mod entities;
pub mod feedback;
pub mod growth;
pub mod opentdb;
pub mod question;
pub mod session;
pub mod trivia;

pub use category::{Category, Difficulty};
pub use controller::{QuizError, QuizSessionController};
pub use feedback::{LogFeedback, QuizFeedback};
pub use growth::{GrowthModel, GrowthSnapshot, GrowthStage, GROWTH_STAGES};
pub use opentdb::OpenTdbProvider;
pub use question::{AnswerSet, Question};
pub use session::{
    AdvanceTicket, AnswerOutcome, Progress, QuizSession, QuizState, REWARD_PER_CORRECT_ANSWER,
};
pub use trivia::{DedupToken, QuestionQuery, TriviaError, TriviaProvider, QUESTIONS_PER_SESSION};
