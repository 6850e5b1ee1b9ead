use rand::{seq::SliceRandom, Rng};
use serde::Serialize;

/// The answers offered for one question, in display order.
///
/// The order is fixed when the question is built and never reshuffled, so
/// reading it repeatedly cannot reveal the correct answer by position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(Vec<String>);

impl AnswerSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, choice: &str) -> bool {
        self.0.iter().any(|a| a == choice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    distractors: Vec<String>,
    answers: AnswerSet,
}

impl Question {
    /// Builds a question and shuffles its answer set once with `rng`.
    pub fn new<R: Rng + ?Sized>(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        distractors: Vec<String>,
        rng: &mut R,
    ) -> Self {
        let correct_answer = correct_answer.into();

        let mut answers = distractors.clone();
        answers.push(correct_answer.clone());
        answers.shuffle(rng);

        Self {
            prompt: prompt.into(),
            correct_answer,
            distractors,
            answers: AnswerSet(answers),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}
