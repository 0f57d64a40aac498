use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoQuizAttemptRepository, QuizAttemptRepository},
    services::{
        history_service::HistoryService,
        question_generator::{HttpQuestionGenerator, QuestionGenerator},
        quiz_attempt_service::QuizAttemptService,
        quiz_service::QuizService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub history_service: Arc<HistoryService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let generator = HttpQuestionGenerator::from_config(&config)?.map(|generator| {
            log::info!("Quiz engine client targeting {}", generator.endpoint());
            Arc::new(generator) as Arc<dyn QuestionGenerator>
        });

        Ok(Self::from_parts(attempt_repository, generator, config))
    }

    /// Wires the services over an already-built store and engine client.
    pub fn from_parts(
        repository: Arc<dyn QuizAttemptRepository>,
        generator: Option<Arc<dyn QuestionGenerator>>,
        config: Config,
    ) -> Self {
        let history_service = Arc::new(HistoryService::new(repository.clone()));
        let quiz_service = Arc::new(QuizService::new(history_service.clone(), generator));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(repository));

        Self {
            history_service,
            quiz_service,
            quiz_attempt_service,
            config: Arc::new(config),
        }
    }
}
