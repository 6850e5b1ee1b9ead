use std::{collections::HashSet, time::Duration};

use async_trait::async_trait;
use rand::Rng;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    quiz::{
        entities::decode_html_entities, DedupToken, Question, QuestionQuery, TriviaError,
        TriviaProvider,
    },
};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    response_code: i64,
    #[serde(default)]
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    response_code: i64,
    #[serde(default)]
    results: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    question: String,
    correct_answer: String,
    #[serde(default)]
    incorrect_answers: Vec<String>,
}

/// Open Trivia DB client.
pub struct OpenTdbProvider {
    client: reqwest::Client,
    base_url: String,
}

impl OpenTdbProvider {
    pub fn new(base_url: &str, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build trivia client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TriviaError> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| TriviaError::Transport(e.to_string()))?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            return Err(TriviaError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(TriviaError::Transport(format!(
                "{} returned HTTP {}",
                path,
                response.status()
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| TriviaError::Decode(e.to_string()))
    }
}

const DISTRACTORS_PER_QUESTION: usize = 3;

/// Decodes a result set and checks it can be played as-is: exactly `amount`
/// questions, each with three distinct distractors that differ from the
/// correct answer.
fn build_questions<R: Rng + ?Sized>(
    raw: Vec<RawQuestion>,
    amount: usize,
    rng: &mut R,
) -> Result<Vec<Question>, TriviaError> {
    if raw.len() != amount {
        return Err(TriviaError::Decode(format!(
            "expected {} questions, provider sent {}",
            amount,
            raw.len()
        )));
    }

    raw.into_iter()
        .enumerate()
        .map(|(i, q)| {
            let correct = decode_html_entities(&q.correct_answer);
            let distractors: Vec<String> = q
                .incorrect_answers
                .iter()
                .map(|a| decode_html_entities(a))
                .collect();

            let distinct: HashSet<&str> = distractors.iter().map(String::as_str).collect();
            let playable = distractors.len() == DISTRACTORS_PER_QUESTION
                && distinct.len() == DISTRACTORS_PER_QUESTION
                && !distinct.contains(correct.as_str());

            if !playable {
                return Err(TriviaError::Decode(format!(
                    "question {} needs {} distinct wrong answers",
                    i + 1,
                    DISTRACTORS_PER_QUESTION
                )));
            }

            Ok(Question::new(
                decode_html_entities(&q.question),
                correct,
                distractors,
                rng,
            ))
        })
        .collect()
}

#[async_trait]
impl TriviaProvider for OpenTdbProvider {
    async fn request_token(&self) -> Result<DedupToken, TriviaError> {
        let body: TokenResponse = self
            .get_json("api_token.php", &[("command", "request".to_string())])
            .await?;

        if let Some(err) = TriviaError::from_response_code(body.response_code) {
            return Err(err);
        }

        body.token
            .filter(|t| !t.is_empty())
            .map(DedupToken::new)
            .ok_or_else(|| TriviaError::Decode("token response without a token".to_string()))
    }

    async fn fetch_questions(&self, query: &QuestionQuery) -> Result<Vec<Question>, TriviaError> {
        let mut params = vec![
            ("amount", query.amount.to_string()),
            ("category", query.category.provider_id().to_string()),
            ("difficulty", query.difficulty.as_str().to_string()),
            ("type", "multiple".to_string()),
        ];
        if let Some(token) = &query.token {
            params.push(("token", token.as_str().to_string()));
        }

        let body: QuestionsResponse = self.get_json("api.php", &params).await?;

        if let Some(err) = TriviaError::from_response_code(body.response_code) {
            return Err(err);
        }
        if body.results.is_empty() {
            return Err(TriviaError::NoResults);
        }

        log::debug!(
            "Fetched {} {} questions in {}",
            body.results.len(),
            query.difficulty,
            query.category
        );

        build_questions(body.results, query.amount as usize, &mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QUESTIONS_PER_SESSION;
    use rand::{rngs::StdRng, SeedableRng};

    const SAMPLE: &str = r#"{
        "response_code": 0,
        "results": [{
            "type": "multiple",
            "difficulty": "medium",
            "category": "Science: Computers",
            "question": "What does &quot;HTTP&quot; stand for?",
            "correct_answer": "Hypertext Transfer Protocol",
            "incorrect_answers": ["Hyper Tool Transfer", "Host Text Protocol", "High Transfer Text Program"]
        }]
    }"#;

    #[test]
    fn payload_is_decoded_and_shuffled_at_build_time() {
        let body: QuestionsResponse = serde_json::from_str(SAMPLE).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let questions = build_questions(body.results, 1, &mut rng).unwrap();

        assert_eq!(questions.len(), 1);
        let q = &questions[0];
        assert_eq!(q.prompt(), "What does \"HTTP\" stand for?");
        assert_eq!(q.correct_answer(), "Hypertext Transfer Protocol");
        assert_eq!(q.answers().len(), 4);
        assert!(q.answers().contains("Hypertext Transfer Protocol"));
    }

    fn raw(correct: &str, wrong: &[&str]) -> RawQuestion {
        RawQuestion {
            question: format!("Which one is {}?", correct),
            correct_answer: correct.to_string(),
            incorrect_answers: wrong.iter().map(|w| w.to_string()).collect(),
        }
    }

    #[test]
    fn questions_without_three_distinct_distractors_are_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let missing: RawQuestion =
            serde_json::from_str(r#"{"question": "Q?", "correct_answer": "A"}"#).unwrap();

        let malformed = [
            missing,
            raw("A", &["B"]),
            raw("A", &["B", "C", "D", "E"]),
            raw("A", &["B", "B", "C"]),
            raw("A", &["B", "C", "A"]),
            raw("&amp;", &["B", "C", "&"]),
        ];

        for question in malformed {
            let result = build_questions(vec![question], 1, &mut rng);
            assert!(matches!(result, Err(TriviaError::Decode(_))));
        }
    }

    #[test]
    fn short_result_set_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let two = vec![raw("A", &["B", "C", "D"]), raw("E", &["F", "G", "H"])];

        let result = build_questions(two, QUESTIONS_PER_SESSION as usize, &mut rng);

        assert!(matches!(result, Err(TriviaError::Decode(_))));
    }

    #[test]
    fn failure_payload_without_results_parses() {
        let body: QuestionsResponse =
            serde_json::from_str(r#"{"response_code": 4, "results": []}"#).unwrap();
        assert_eq!(
            TriviaError::from_response_code(body.response_code),
            Some(TriviaError::TokenExhausted)
        );

        let token: TokenResponse =
            serde_json::from_str(r#"{"response_code": 0, "response_message": "ok", "token": "abc"}"#)
                .unwrap();
        assert_eq!(token.token.as_deref(), Some("abc"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider = OpenTdbProvider::new("https://opentdb.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(provider.base_url, "https://opentdb.com");
    }

    #[tokio::test]
    async fn unreachable_provider_is_a_transport_failure() {
        let provider = OpenTdbProvider::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();

        let result = provider.request_token().await;

        assert!(matches!(result, Err(TriviaError::Transport(_))));
    }
}
