use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::dto::engine::{EngineRequest, EngineResponse},
};

pub const API_KEY_HEADER: &str = "X-API-Key";

/// Remote capability that turns generation parameters into questions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &EngineRequest) -> AppResult<EngineResponse>;
}

/// Calls the engine's `/generate` endpoint over HTTP. Never retries: a slow
/// generation call should not be duplicated behind the caller's back.
pub struct HttpQuestionGenerator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpQuestionGenerator {
    pub fn new(base_url: &str, api_key: Option<SecretString>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::ConfigurationError(format!("Failed to build quiz engine client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/generate", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    /// `None` when no engine URL is configured.
    pub fn from_config(config: &Config) -> AppResult<Option<Self>> {
        config
            .quiz_engine_url
            .as_deref()
            .map(|url| Self::new(url, config.quiz_api_key.clone(), config.engine_timeout()))
            .transpose()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuestionGenerator for HttpQuestionGenerator {
    async fn generate(&self, request: &EngineRequest) -> AppResult<EngineResponse> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            log::warn!("Quiz engine request to {} failed: {}", self.endpoint, e);
            AppError::UpstreamError(format!("Quiz engine error: {}", e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read response body".to_string());
            log::warn!("Quiz engine responded with {}: {}", status, body);
            return Err(AppError::UpstreamError(format!(
                "Quiz engine returned {}: {}",
                status, body
            )));
        }

        response.json::<EngineResponse>().await.map_err(|e| {
            log::warn!("Quiz engine sent an unreadable body: {}", e);
            AppError::UpstreamError(format!("Invalid quiz engine response: {}", e))
        })
    }
}
