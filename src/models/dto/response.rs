use serde::Serialize;

use crate::models::domain::{CompletionRecord, QuizSet};

/// `{questions: [...]}`, each question in the generator wire shape.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizResponseDto {
    pub questions: QuizSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionResponseDto {
    pub recorded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<CompletionRecord>,
    pub message: String,
}

impl CompletionResponseDto {
    pub fn from_record(record: Option<CompletionRecord>) -> Self {
        match record {
            Some(record) => CompletionResponseDto {
                recorded: true,
                record: Some(record),
                message: "Quiz completion recorded".to_string(),
            },
            None => CompletionResponseDto {
                recorded: false,
                record: None,
                message: "Anonymous completion not recorded".to_string(),
            },
        }
    }
}
