use serde::Serialize;

use crate::quiz::Question;

/// Points awarded for each correct answer.
pub const REWARD_PER_CORRECT_ANSWER: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizState {
    Idle,
    Loading,
    Playing,
    Finished,
}

/// Identifies the answer a delayed `advance` belongs to. A ticket from an
/// abandoned session or an earlier question is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceTicket {
    epoch: u64,
    question_index: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub question_index: usize,
    pub choice: String,
    pub correct: bool,
    pub correct_answer: String,
    pub points_awarded: u32,
    pub score: u32,
    #[serde(skip)]
    pub ticket: AdvanceTicket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    Next { question_index: usize },
    Finished { score: u32 },
}

/// State of one run of questions. Pure: no I/O, no clocks.
#[derive(Clone, Debug)]
pub struct QuizSession {
    state: QuizState,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    selected_answer: Option<String>,
    epoch: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    pub fn new() -> Self {
        Self {
            state: QuizState::Idle,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            selected_answer: None,
            epoch: 0,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn selected_answer(&self) -> Option<&str> {
        self.selected_answer.as_deref()
    }

    /// An answer has been scored and the session waits for `advance`.
    pub fn is_locked(&self) -> bool {
        self.selected_answer.is_some()
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            QuizState::Playing => self.questions.get(self.current_index),
            _ => None,
        }
    }

    /// Whether a new run may begin. Loading or mid-game sessions must be reset first.
    pub fn can_start(&self) -> bool {
        matches!(self.state, QuizState::Idle | QuizState::Finished)
    }

    pub(crate) fn mark_loading(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.state = QuizState::Loading;
        self.epoch += 1;
        true
    }

    pub(crate) fn load(&mut self, questions: Vec<Question>) {
        debug_assert_eq!(self.state, QuizState::Loading);
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.selected_answer = None;
        self.state = QuizState::Playing;
    }

    pub(crate) fn abort_loading(&mut self) {
        self.questions.clear();
        self.current_index = 0;
        self.score = 0;
        self.selected_answer = None;
        self.state = QuizState::Idle;
    }

    /// Scores `choice` against the current question.
    ///
    /// Returns `None` without touching anything when no question is open, an
    /// answer is already locked, or `choice` is not one of the offered answers.
    pub(crate) fn submit(&mut self, choice: &str) -> Option<AnswerOutcome> {
        if self.is_locked() {
            return None;
        }
        let question = self.current_question()?;
        if !question.answers().contains(choice) {
            return None;
        }

        let correct = question.is_correct(choice);
        let correct_answer = question.correct_answer().to_string();
        let points_awarded = if correct { REWARD_PER_CORRECT_ANSWER } else { 0 };

        self.selected_answer = Some(choice.to_string());
        self.score += points_awarded;

        Some(AnswerOutcome {
            question_index: self.current_index,
            choice: choice.to_string(),
            correct,
            correct_answer,
            points_awarded,
            score: self.score,
            ticket: AdvanceTicket {
                epoch: self.epoch,
                question_index: self.current_index,
            },
        })
    }

    /// Unlocks and moves past the answered question. Stale tickets are ignored.
    pub(crate) fn advance(&mut self, ticket: AdvanceTicket) -> Option<Progress> {
        if self.state != QuizState::Playing
            || !self.is_locked()
            || ticket.epoch != self.epoch
            || ticket.question_index != self.current_index
        {
            return None;
        }

        self.selected_answer = None;
        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            Some(Progress::Next {
                question_index: self.current_index,
            })
        } else {
            self.state = QuizState::Finished;
            Some(Progress::Finished { score: self.score })
        }
    }

    pub(crate) fn reset(&mut self) {
        self.abort_loading();
        self.epoch += 1;
    }
}
