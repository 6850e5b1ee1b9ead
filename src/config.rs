use std::{env, time::Duration};

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEV_GH_CLIENT_ID: &str = "gh_client_id";
const DEV_GH_CLIENT_SECRET: &str = "gh_client_secret";

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub gh_client_id: String,
    pub gh_client_secret: SecretString,
    pub gh_redirect_uri: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub jwt_refresh_expiration_hours: i64,
    pub trivia_base_url: String,
    pub trivia_timeout_secs: u64,
    pub quiz_reveal_delay_ms: u64,
    pub quiz_session_idle_secs: u64,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: var_or("APP_ENV", "development"),
            mongo_conn_string: var_or("MONGO_CONN_STRING", "mongodb://localhost:27017"),
            mongo_db_name: var_or("MONGO_DB_NAME", "eduhive-local"),
            gh_client_id: var_or("GH_CLIENT_ID", DEV_GH_CLIENT_ID),
            gh_client_secret: SecretString::from(var_or("GH_CLIENT_SECRET", DEV_GH_CLIENT_SECRET)),
            gh_redirect_uri: var_or("GH_REDIRECT_URI", "http://localhost:3000/auth/callback"),
            web_server_host: var_or("WEB_SERVER_HOST", "localhost"),
            web_server_port: parsed_or("WEB_SERVER_PORT", 8080),
            cors_allowed_origin: var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            jwt_secret: SecretString::from(var_or("JWT_SECRET", DEV_JWT_SECRET)),
            jwt_expiration_hours: parsed_or("JWT_EXPIRATION_HOURS", 24),
            jwt_refresh_expiration_hours: parsed_or("JWT_REFRESH_EXPIRATION_HOURS", 168),
            trivia_base_url: var_or("TRIVIA_BASE_URL", "https://opentdb.com"),
            trivia_timeout_secs: parsed_or("TRIVIA_TIMEOUT_SECS", 10),
            quiz_reveal_delay_ms: parsed_or("QUIZ_REVEAL_DELAY_MS", 1500),
            quiz_session_idle_secs: parsed_or("QUIZ_SESSION_IDLE_SECS", 1800),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    pub fn trivia_timeout(&self) -> Duration {
        Duration::from_secs(self.trivia_timeout_secs)
    }

    pub fn quiz_reveal_delay(&self) -> Duration {
        Duration::from_millis(self.quiz_reveal_delay_ms)
    }

    pub fn quiz_session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.quiz_session_idle_secs)
    }

    /// Refuses to run a production deployment with the development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), at least 32 characters are required",
                jwt_secret.len()
            )));
        }

        if self.gh_client_secret.expose_secret() == DEV_GH_CLIENT_SECRET
            || self.gh_client_id == DEV_GH_CLIENT_ID
        {
            return Err(AppError::InternalError(
                "GitHub OAuth credentials are using default values".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "eduhive-test".to_string(),
            gh_client_id: "id string".to_string(),
            gh_client_secret: SecretString::from("secret string".to_string()),
            gh_redirect_uri: "http://localhost:3000/auth/callback".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:3000".to_string(),
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            jwt_refresh_expiration_hours: 24,
            trivia_base_url: "http://127.0.0.1:9".to_string(),
            trivia_timeout_secs: 1,
            quiz_reveal_delay_ms: 0,
            quiz_session_idle_secs: 60,
        }
    }
}
