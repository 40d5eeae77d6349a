use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoCompletionRepository, MongoSubjectRepository},
    services::{
        content_fetcher::ContentFetcher, generation_gateway::HttpGenerationGateway,
        quiz_parser::QuizParser, quiz_service::QuizService, score_reporter::ScoreReporter,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let subject_repository = Arc::new(MongoSubjectRepository::new(
            &db,
            &config.subjects_collection,
        ));
        let completion_repository = Arc::new(MongoCompletionRepository::new(
            &db,
            &config.completions_collection,
        ));
        completion_repository.ensure_indexes().await?;

        let gateway = Arc::new(HttpGenerationGateway::new(&config)?);

        let quiz_service = Arc::new(QuizService::new(
            ContentFetcher::new(subject_repository),
            gateway,
            QuizParser::new(config.extraction_strategy),
            ScoreReporter::new(completion_repository),
        ));

        Ok(Self::from_parts(quiz_service, config))
    }

    pub fn from_parts(quiz_service: Arc<QuizService>, config: Config) -> Self {
        Self {
            quiz_service,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
