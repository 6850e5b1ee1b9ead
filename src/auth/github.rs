use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";

/// The parts of a GitHub account needed to create or refresh a local user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubProfile {
    pub github_id: String,
    pub login: String,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// Exchanges OAuth authorization codes and reads the signed-in account.
pub struct GithubOAuthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    default_redirect_uri: String,
}

impl GithubOAuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.gh_client_id.clone(),
            client_secret: config.gh_client_secret.clone(),
            default_redirect_uri: config.gh_redirect_uri.clone(),
        }
    }

    pub async fn exchange_code(&self, code: &str, redirect_uri: Option<&str>) -> AppResult<String> {
        // Must match the URI used in the authorization request
        let redirect_uri = redirect_uri.unwrap_or(self.default_redirect_uri.as_str());

        let response = self
            .http
            .post(GITHUB_TOKEN_URL)
            .header("accept", "application/json")
            .form(&[
                ("code", code),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.expose_secret()),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach GitHub token endpoint: {}", e);
                AppError::InternalError(format!("Failed to exchange OAuth code: {}", e))
            })?;

        log::debug!("GitHub token exchange responded with {}", response.status());

        let body: TokenExchangeResponse = response.json().await.map_err(|e| {
            AppError::InternalError(format!("Failed to parse token response: {}", e))
        })?;

        token_from_response(body)
    }

    pub async fn fetch_profile(&self, access_token: &str) -> AppResult<GithubProfile> {
        let gh_client = Octocrab::builder()
            .user_access_token(access_token.to_string())
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build GitHub client: {}", e)))?;

        let gh_user = gh_client
            .current()
            .user()
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to fetch GitHub user: {}", e)))?;

        let email = gh_user
            .email
            .clone()
            .unwrap_or_else(|| format!("{}@users.noreply.github.com", gh_user.login));

        Ok(GithubProfile {
            github_id: gh_user.id.to_string(),
            login: gh_user.login,
            email,
            name: gh_user.name,
        })
    }
}

fn token_from_response(body: TokenExchangeResponse) -> AppResult<String> {
    if let Some(error) = body.error {
        let description = body
            .error_description
            .unwrap_or_else(|| "Unknown error".to_string());
        log::warn!("GitHub OAuth error: {} - {}", error, description);
        return Err(AppError::Unauthorized(format!(
            "GitHub OAuth error: {} - {}",
            error, description
        )));
    }

    body.access_token.ok_or_else(|| {
        AppError::InternalError("No access_token in GitHub response".to_string())
    })
}
