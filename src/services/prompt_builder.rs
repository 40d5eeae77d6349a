use crate::models::domain::{
    generation_request::{DEFAULT_QUESTION_COUNT, MAX_QUESTION_COUNT},
    Difficulty, GenerationRequest, Subject,
};

pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the generation request for a subject.
    ///
    /// A zero count falls back to the default; counts above the maximum are capped.
    pub fn build(
        subject: &Subject,
        difficulty: Option<Difficulty>,
        question_count: Option<u16>,
    ) -> GenerationRequest {
        GenerationRequest {
            subject_text: Self::subject_text(subject),
            difficulty: difficulty.unwrap_or_default(),
            question_count: Self::sanitize_count(question_count),
        }
    }

    /// Builds a request from subject text the caller already assembled.
    pub fn from_text(
        subject_text: &str,
        difficulty: Option<Difficulty>,
        question_count: Option<u16>,
    ) -> GenerationRequest {
        GenerationRequest {
            subject_text: subject_text.to_string(),
            difficulty: difficulty.unwrap_or_default(),
            question_count: Self::sanitize_count(question_count),
        }
    }

    /// Title, description, era and location, one per line.
    pub fn subject_text(subject: &Subject) -> String {
        format!(
            "{}\n{}\nEra: {}\nLocation: {}",
            subject.title, subject.description, subject.era, subject.location
        )
    }

    pub fn sanitize_count(question_count: Option<u16>) -> u16 {
        match question_count {
            None => DEFAULT_QUESTION_COUNT,
            Some(0) => {
                log::warn!(
                    "Question count 0 is invalid, using default of {}",
                    DEFAULT_QUESTION_COUNT
                );
                DEFAULT_QUESTION_COUNT
            }
            Some(count) if count > MAX_QUESTION_COUNT => {
                log::warn!(
                    "Question count {} exceeds maximum, capping at {}",
                    count,
                    MAX_QUESTION_COUNT
                );
                MAX_QUESTION_COUNT
            }
            Some(count) => count,
        }
    }
}
