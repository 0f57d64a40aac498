use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database as MongoDatabase,
};

use crate::{config::Config, errors::AppResult, models::domain::QuizAttempt};

const APP_NAME: &str = "adaptive-quiz-server";
const MAX_POOL_SIZE: u32 = 10;
const MIN_POOL_SIZE: u32 = 2;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle on the quiz database, bound to the configured attempts collection.
#[derive(Clone)]
pub struct Database {
    database: MongoDatabase,
    attempts_collection: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut options = ClientOptions::parse(&config.mongo_conn_string).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        options.max_pool_size = Some(MAX_POOL_SIZE);
        options.min_pool_size = Some(MIN_POOL_SIZE);
        options.connect_timeout = Some(CONNECT_TIMEOUT);
        options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let database = Client::with_options(options)?.database(&config.mongo_db_name);
        let db = Self {
            database,
            attempts_collection: config.attempts_collection.clone(),
        };
        db.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}', attempts in '{}'",
            config.mongo_db_name,
            config.attempts_collection
        );
        Ok(db)
    }

    /// Attempts with their embedded details.
    pub fn attempts(&self) -> Collection<QuizAttempt> {
        self.database.collection(&self.attempts_collection)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
