use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::dto::{request::GenerateQuizRequest, response::GeneratedQuestionSet},
    services::{
        difficulty::select_level,
        engine_adapter::{build_request, translate},
        history_service::HistoryService,
        question_generator::QuestionGenerator,
    },
};

/// Runs the adaptive generate loop: history, level choice, engine call, translation.
pub struct QuizService {
    history: Arc<HistoryService>,
    generator: Option<Arc<dyn QuestionGenerator>>,
}

impl QuizService {
    /// `generator` is `None` when no engine is configured.
    pub fn new(history: Arc<HistoryService>, generator: Option<Arc<dyn QuestionGenerator>>) -> Self {
        Self { history, generator }
    }

    pub async fn generate_quiz(&self, request: GenerateQuizRequest) -> AppResult<GeneratedQuestionSet> {
        let generator = self
            .generator
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationError("Quiz engine URL not configured".to_string()))?;

        let history = self
            .history
            .summarize(request.profile_id, &request.subject, &request.topic)
            .await?;
        let bloom_level = select_level(&history, request.bloom_level.as_deref());

        let engine_request = build_request(
            &request.grade,
            &request.subject,
            &request.topic,
            &bloom_level,
            history,
        )?;

        log::info!(
            "Generating quiz for profile {} ({}/{}, grade {}) at level {}",
            request.profile_id,
            request.subject,
            request.topic,
            engine_request.grade,
            bloom_level
        );

        let response = generator.generate(&engine_request).await?;
        Ok(translate(response))
    }
}
