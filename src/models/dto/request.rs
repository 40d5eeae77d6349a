use serde::Deserialize;
use validator::Validate;

use crate::errors::AppResult;
use crate::models::domain::generation_request::MAX_QUESTION_COUNT;
use crate::models::domain::Difficulty;

/// Body of the generate-quiz call made by the quiz page.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequestDto {
    #[validate(length(min = 1, message = "Monument text is required"))]
    pub monument_text: String,

    pub difficulty: Option<String>,

    #[validate(range(min = 1, max = MAX_QUESTION_COUNT))]
    pub question_count: Option<u16>,
}

impl GenerateQuizRequestDto {
    pub fn difficulty(&self) -> AppResult<Option<Difficulty>> {
        parse_difficulty(self.difficulty.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubjectQuizRequestDto {
    pub difficulty: Option<String>,

    #[validate(range(min = 1, max = MAX_QUESTION_COUNT))]
    pub question_count: Option<u16>,
}

impl SubjectQuizRequestDto {
    pub fn difficulty(&self) -> AppResult<Option<Difficulty>> {
        parse_difficulty(self.difficulty.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequestDto {
    #[validate(length(min = 1, max = 200))]
    pub subject_id: String,

    pub user_id: Option<String>,

    pub score: u32,

    #[validate(range(min = 1))]
    pub total_questions: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQueryDto {
    pub subject_id: Option<String>,
}

fn parse_difficulty(value: Option<&str>) -> AppResult<Option<Difficulty>> {
    value.map(|v| v.parse::<Difficulty>()).transpose()
}
