use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, GenerationRequest, QuizSet},
    services::{
        content_fetcher::ContentFetcher,
        generation_gateway::GenerationGateway,
        prompt_builder::PromptBuilder,
        quiz_parser::QuizParser,
        quiz_session::{QuizResult, QuizSession},
        score_reporter::ScoreReporter,
    },
};

/// Fetch → prompt → generate → parse, plus completion reporting.
pub struct QuizService {
    fetcher: ContentFetcher,
    gateway: Arc<dyn GenerationGateway>,
    parser: QuizParser,
    reporter: ScoreReporter,
}

impl QuizService {
    pub fn new(
        fetcher: ContentFetcher,
        gateway: Arc<dyn GenerationGateway>,
        parser: QuizParser,
        reporter: ScoreReporter,
    ) -> Self {
        Self {
            fetcher,
            gateway,
            parser,
            reporter,
        }
    }

    pub fn reporter(&self) -> &ScoreReporter {
        &self.reporter
    }

    pub async fn start_for_subject(
        &self,
        subject_id: &str,
        difficulty: Option<Difficulty>,
        question_count: Option<u16>,
    ) -> AppResult<QuizSet> {
        let subject = self.fetcher.fetch(subject_id).await?;
        let request = PromptBuilder::build(&subject, difficulty, question_count);
        self.generate(&request).await
    }

    pub async fn generate_from_text(
        &self,
        subject_text: &str,
        difficulty: Option<Difficulty>,
        question_count: Option<u16>,
    ) -> AppResult<QuizSet> {
        if subject_text.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Monument text is required".to_string(),
            ));
        }
        let request = PromptBuilder::from_text(subject_text, difficulty, question_count);
        self.generate(&request).await
    }

    async fn generate(&self, request: &GenerationRequest) -> AppResult<QuizSet> {
        let raw_text = self.gateway.generate(request).await.map_err(|err| {
            log::error!("Quiz generation failed: {}", err);
            match err {
                AppError::GenerationError(_) => err,
                other => AppError::GenerationError(other.to_string()),
            }
        })?;

        let quiz_set = self
            .parser
            .parse_limited(&raw_text, usize::from(request.question_count))
            .map_err(|err| {
                log::warn!(
                    "Generator output could not be parsed ({:?} extraction, {} bytes): {}",
                    self.parser.strategy(),
                    raw_text.len(),
                    err
                );
                err
            })?;

        if quiz_set.len() < usize::from(request.question_count) {
            log::info!(
                "Generator produced {} of {} requested questions",
                quiz_set.len(),
                request.question_count
            );
        }

        Ok(quiz_set)
    }

    /// Reports a completed session. The result is returned even when the report fails.
    pub async fn finish(
        &self,
        subject_id: &str,
        user_id: Option<&str>,
        session: &QuizSession,
    ) -> AppResult<QuizResult> {
        let result = session.result().ok_or_else(|| {
            AppError::InvalidTransition("session has not been completed".to_string())
        })?;

        self.reporter
            .report_or_log(subject_id, user_id, result.score as u32, result.total as u32)
            .await;

        Ok(result)
    }
}
