use std::env;
use std::time::Duration;

use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

pub const DEFAULT_ENGINE_TIMEOUT_SECS: u64 = 1000;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub attempts_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Base URL of the quiz generation engine. `None` disables generation.
    pub quiz_engine_url: Option<String>,
    pub quiz_api_key: Option<SecretString>,
    pub quiz_engine_timeout_secs: u64,
    /// Empty means any origin is allowed.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "adaptive-learning-local".to_string()),
            attempts_collection: env::var("ATTEMPTS_COLLECTION")
                .unwrap_or_else(|_| "quiz_attempts".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            quiz_engine_url: normalize_engine_url(env::var("QUIZ_ENGINE_URL").ok()),
            quiz_api_key: env::var("QUIZ_API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .map(SecretString::from),
            quiz_engine_timeout_secs: env::var("QUIZ_ENGINE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_ENGINE_TIMEOUT_SECS),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        }
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_secs(self.quiz_engine_timeout_secs)
    }

    /// Reject settings that would only fail later, at request time.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if let Some(url) = &self.quiz_engine_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::ConfigurationError(format!(
                    "QUIZ_ENGINE_URL must be an http(s) URL, got '{}'",
                    url
                )));
            }
        } else {
            log::warn!("QUIZ_ENGINE_URL is not set; quiz generation will be unavailable");
        }

        if self.quiz_engine_timeout_secs == 0 {
            return Err(AppError::ConfigurationError(
                "QUIZ_ENGINE_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "adaptive-learning-test".to_string(),
            attempts_collection: "quiz_attempts".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8000,
            quiz_engine_url: Some("http://localhost:9000".to_string()),
            quiz_api_key: Some(SecretString::from("test_engine_key".to_string())),
            quiz_engine_timeout_secs: 30,
            cors_allowed_origins: Vec::new(),
        }
    }
}

fn normalize_engine_url(raw: Option<String>) -> Option<String> {
    raw.map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
