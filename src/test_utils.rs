#[cfg(test)]
pub mod fixtures {
    use std::{collections::HashMap, sync::Mutex};

    use async_trait::async_trait;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{
        errors::{AppError, AppResult},
        quiz::{DedupToken, Question, QuestionQuery, TriviaError, TriviaProvider},
        repositories::RewardLedger,
    };

    /// Deterministic multiple-choice questions with three distractors each.
    pub fn sample_questions(count: usize) -> Vec<Question> {
        let mut rng = StdRng::seed_from_u64(7);
        (0..count)
            .map(|i| {
                Question::new(
                    format!("Sample question #{}?", i + 1),
                    format!("right-{}", i),
                    vec![
                        format!("wrong-{}-a", i),
                        format!("wrong-{}-b", i),
                        format!("wrong-{}-c", i),
                    ],
                    &mut rng,
                )
            })
            .collect()
    }

    /// Provider that always hands out the same token and question set.
    pub struct StaticTriviaProvider {
        questions: Vec<Question>,
    }

    impl StaticTriviaProvider {
        pub fn new(questions: Vec<Question>) -> Self {
            Self { questions }
        }
    }

    #[async_trait]
    impl TriviaProvider for StaticTriviaProvider {
        async fn request_token(&self) -> Result<DedupToken, TriviaError> {
            Ok(DedupToken::new("static-token"))
        }

        async fn fetch_questions(&self, _query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
            if self.questions.is_empty() {
                return Err(TriviaError::NoResults);
            }
            Ok(self.questions.clone())
        }
    }

    /// Ledger kept in memory. Unknown users hold a zero balance.
    #[derive(Default)]
    pub struct MemoryLedger {
        totals: Mutex<HashMap<String, i64>>,
        unlocked: Mutex<HashMap<String, Vec<String>>>,
        failing_awards: Mutex<u32>,
    }

    impl MemoryLedger {
        pub fn with_balance(user_id: &str, xp: i64) -> Self {
            let ledger = Self::default();
            ledger.totals.lock().unwrap().insert(user_id.to_string(), xp);
            ledger
        }

        /// The next `count` awards fail as if the database were unreachable.
        pub fn fail_next_awards(self, count: u32) -> Self {
            *self.failing_awards.lock().unwrap() = count;
            self
        }

        pub fn total(&self, user_id: &str) -> i64 {
            self.totals.lock().unwrap().get(user_id).copied().unwrap_or(0)
        }

        pub fn unlocked(&self, user_id: &str) -> Vec<String> {
            self.unlocked.lock().unwrap().get(user_id).cloned().unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.totals.lock().unwrap().is_empty()
        }
    }

    #[async_trait]
    impl RewardLedger for MemoryLedger {
        async fn award(&self, user_id: &str, points: u32) -> AppResult<i64> {
            {
                let mut failing = self.failing_awards.lock().unwrap();
                if *failing > 0 {
                    *failing -= 1;
                    return Err(AppError::DatabaseError("ledger unavailable".to_string()));
                }
            }
            let mut totals = self.totals.lock().unwrap();
            let total = totals.entry(user_id.to_string()).or_insert(0);
            *total += points as i64;
            Ok(*total)
        }

        async fn balance(&self, user_id: &str) -> AppResult<i64> {
            Ok(self.total(user_id))
        }

        async fn spend(&self, user_id: &str, cost: i64, item: &str) -> AppResult<Option<i64>> {
            let mut totals = self.totals.lock().unwrap();
            let total = totals.entry(user_id.to_string()).or_insert(0);
            if *total < cost {
                return Ok(None);
            }
            *total -= cost;

            let mut unlocked = self.unlocked.lock().unwrap();
            let items = unlocked.entry(user_id.to_string()).or_default();
            if !items.iter().any(|i| i == item) {
                items.push(item.to_string());
            }
            Ok(Some(*total))
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::repositories::RewardLedger;

    #[test]
    fn sample_questions_offer_four_answers() {
        let questions = sample_questions(5);
        assert_eq!(questions.len(), 5);
        for q in &questions {
            assert_eq!(q.answers().len(), 4);
            assert!(q.answers().contains(q.correct_answer()));
        }
    }

    #[tokio::test]
    async fn memory_ledger_refuses_overdraft() {
        let ledger = MemoryLedger::with_balance("u", 250);
        assert_eq!(ledger.spend("u", 300, "crystal_water").await.unwrap(), None);
        assert_eq!(ledger.spend("u", 200, "x").await.unwrap(), Some(50));
        assert_eq!(ledger.unlocked("u"), vec!["x".to_string()]);
    }
}
