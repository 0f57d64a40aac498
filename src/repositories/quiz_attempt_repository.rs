use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{QuizAttempt, QuizAttemptSummary},
};

/// Newest first. `id` breaks ties between attempts with the same timestamp;
/// ids are UUID v7 so a larger id was created later.
pub fn newest_first() -> mongodb::bson::Document {
    doc! { "taken_at": -1, "id": -1 }
}

#[async_trait]
pub trait QuizAttemptRepository: Send + Sync {
    /// Stores the attempt together with all of its details, or nothing.
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>>;
    async fn recent_for_topic(
        &self,
        profile_id: i64,
        subject: &str,
        topic: &str,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>>;
    async fn recent_for_profile(
        &self,
        profile_id: i64,
        subject: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>>;
    async fn delete_by_profile(&self, profile_id: i64) -> AppResult<u64>;
    async fn health_check(&self) -> AppResult<()>;
}

pub struct MongoQuizAttemptRepository {
    db: Database,
    collection: Collection<QuizAttempt>,
    summaries: Collection<QuizAttemptSummary>,
}

impl MongoQuizAttemptRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.attempts();
        let summaries = collection.clone_with_type::<QuizAttemptSummary>();
        Self {
            db: db.clone(),
            collection,
            summaries,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quiz attempts collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let topic_history_index = IndexModel::builder()
            .keys(doc! { "profile_id": 1, "subject": 1, "topic": 1, "taken_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("profile_subject_topic_taken_at".to_string())
                    .build(),
            )
            .build();

        let profile_index = IndexModel::builder()
            .keys(doc! { "profile_id": 1, "taken_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("profile_taken_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(topic_history_index).await?;
        self.collection.create_index(profile_index).await?;

        log::info!("Successfully created indexes for quiz attempts collection");
        Ok(())
    }

    async fn find_summaries(
        &self,
        filter: mongodb::bson::Document,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        let attempts = self
            .summaries
            .find(filter)
            .projection(doc! { "details": 0 })
            .sort(newest_first())
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        Ok(attempts)
    }
}

#[async_trait]
impl QuizAttemptRepository for MongoQuizAttemptRepository {
    async fn create(&self, attempt: QuizAttempt) -> AppResult<QuizAttempt> {
        self.collection.insert_one(&attempt).await?;
        Ok(attempt)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<QuizAttempt>> {
        let attempt = self.collection.find_one(doc! { "id": id }).await?;
        Ok(attempt)
    }

    async fn recent_for_topic(
        &self,
        profile_id: i64,
        subject: &str,
        topic: &str,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        self.find_summaries(
            doc! {
                "profile_id": profile_id,
                "subject": subject,
                "topic": topic
            },
            limit,
        )
        .await
    }

    async fn recent_for_profile(
        &self,
        profile_id: i64,
        subject: Option<&str>,
        limit: i64,
    ) -> AppResult<Vec<QuizAttemptSummary>> {
        let mut filter = doc! { "profile_id": profile_id };

        if let Some(subject) = subject {
            filter.insert("subject", subject);
        }

        self.find_summaries(filter, limit).await
    }

    async fn delete_by_profile(&self, profile_id: i64) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "profile_id": profile_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.health_check().await
    }
}
