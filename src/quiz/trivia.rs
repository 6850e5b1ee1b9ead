use async_trait::async_trait;
use thiserror::Error;

use crate::quiz::{Category, Difficulty, Question};

/// Questions requested per quiz session.
pub const QUESTIONS_PER_SESSION: u8 = 5;

/// Opaque token issued by the trivia provider so repeated fetches do not
/// return questions the player has already seen. Lives only as long as the
/// controller holding it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DedupToken(String);

impl DedupToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionQuery {
    pub amount: u8,
    pub category: Category,
    pub difficulty: Difficulty,
    pub token: Option<DedupToken>,
}

impl QuestionQuery {
    pub fn new(category: Category, difficulty: Difficulty, token: Option<DedupToken>) -> Self {
        Self {
            amount: QUESTIONS_PER_SESSION,
            category,
            difficulty,
            token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriviaError {
    #[error("no questions available for this category and difficulty")]
    NoResults,
    #[error("trivia request had invalid parameters")]
    InvalidParameter,
    #[error("session token not found")]
    TokenNotFound,
    #[error("session token has returned every available question")]
    TokenExhausted,
    #[error("trivia provider rate limit reached")]
    RateLimited,
    #[error("trivia provider returned unexpected response code {0}")]
    UnexpectedCode(i64),
    #[error("trivia provider unreachable: {0}")]
    Transport(String),
    #[error("trivia payload could not be decoded: {0}")]
    Decode(String),
}

impl TriviaError {
    /// Maps an Open Trivia DB `response_code`. Code 0 is success.
    pub fn from_response_code(code: i64) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(TriviaError::NoResults),
            2 => Some(TriviaError::InvalidParameter),
            3 => Some(TriviaError::TokenNotFound),
            4 => Some(TriviaError::TokenExhausted),
            5 => Some(TriviaError::RateLimited),
            other => Some(TriviaError::UnexpectedCode(other)),
        }
    }

    /// Whether the dedup token must be dropped before the next attempt.
    pub fn invalidates_token(&self) -> bool {
        matches!(self, TriviaError::TokenNotFound | TriviaError::TokenExhausted)
    }

    /// Message shown to the player when a session cannot start.
    pub fn user_message(&self) -> &'static str {
        match self {
            TriviaError::NoResults => "No questions left for this category. Try another category.",
            TriviaError::TokenNotFound | TriviaError::TokenExhausted => {
                "Question pool exhausted. Start again for a fresh set."
            }
            TriviaError::RateLimited => "Too many requests. Wait a few seconds and try again.",
            TriviaError::InvalidParameter
            | TriviaError::UnexpectedCode(_)
            | TriviaError::Transport(_)
            | TriviaError::Decode(_) => "Trivia node offline. Try another category.",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TriviaProvider: Send + Sync {
    async fn request_token(&self) -> Result<DedupToken, TriviaError>;
    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError>;
}
