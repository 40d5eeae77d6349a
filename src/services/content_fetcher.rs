use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Subject,
    repositories::SubjectRepository,
};

pub struct ContentFetcher {
    repository: Arc<dyn SubjectRepository>,
}

impl ContentFetcher {
    pub fn new(repository: Arc<dyn SubjectRepository>) -> Self {
        Self { repository }
    }

    /// Loads the subject a quiz will be generated about. Any failure is a `FetchError`.
    pub async fn fetch(&self, subject_id: &str) -> AppResult<Subject> {
        if subject_id.trim().is_empty() {
            return Err(AppError::FetchError("subject id is empty".to_string()));
        }

        match self.repository.find_by_id(subject_id).await {
            Ok(Some(subject)) => Ok(subject),
            Ok(None) => Err(AppError::FetchError(format!(
                "Subject with id '{}' not found",
                subject_id
            ))),
            Err(err) => {
                log::error!("Failed to load subject '{}': {}", subject_id, err);
                Err(AppError::FetchError(format!(
                    "Failed to load subject '{}': {}",
                    subject_id, err
                )))
            }
        }
    }
}
