use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{CompletionRecord, CompletionStats},
    repositories::CompletionRepository,
};

pub struct ScoreReporter {
    repository: Arc<dyn CompletionRepository>,
}

impl ScoreReporter {
    pub fn new(repository: Arc<dyn CompletionRepository>) -> Self {
        Self { repository }
    }

    /// Persists a completion record. Anonymous completions are not recorded and yield `Ok(None)`.
    pub async fn report(
        &self,
        subject_id: &str,
        user_id: Option<&str>,
        score: u32,
        total: u32,
    ) -> AppResult<Option<CompletionRecord>> {
        if score > total {
            return Err(AppError::ValidationError(format!(
                "score {} exceeds total {}",
                score, total
            )));
        }

        let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) else {
            log::debug!("Skipping completion record for anonymous user on '{}'", subject_id);
            return Ok(None);
        };

        let record = CompletionRecord::new(subject_id, Some(user_id), score, total);
        let stored = self
            .repository
            .create(record)
            .await
            .map_err(|e| AppError::ReportError(e.to_string()))?;

        log::info!(
            "Recorded quiz completion {} for subject '{}': {}/{}",
            stored.id,
            subject_id,
            score,
            total
        );
        Ok(Some(stored))
    }

    /// Like `report`, but a failed write is logged and swallowed.
    pub async fn report_or_log(
        &self,
        subject_id: &str,
        user_id: Option<&str>,
        score: u32,
        total: u32,
    ) -> Option<CompletionRecord> {
        match self.report(subject_id, user_id, score, total).await {
            Ok(record) => record,
            Err(err) => {
                log::error!("Error tracking quiz completion for '{}': {}", subject_id, err);
                None
            }
        }
    }

    pub async fn completion_stats(&self) -> AppResult<CompletionStats> {
        let records = self.repository.list_all().await?;
        Ok(CompletionStats::from_records(&records))
    }

    pub async fn subject_completion_stats(&self, subject_id: &str) -> AppResult<CompletionStats> {
        let records = self.repository.list_by_subject(subject_id).await?;
        Ok(CompletionStats::from_records(&records))
    }
}
