use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_QUESTION_COUNT: u16 = 5;
pub const MAX_QUESTION_COUNT: u16 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(AppError::ValidationError(format!(
                "Unknown difficulty '{}', expected easy, medium or hard",
                other
            ))),
        }
    }
}

/// Input to the generation service. Built once per session by the prompt builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub subject_text: String,
    pub difficulty: Difficulty,
    pub question_count: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" hard ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("MEDIUM".parse::<Difficulty>(), Ok(Difficulty::Medium));
    }

    #[test]
    fn difficulty_rejects_unknown_value() {
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn difficulty_defaults_to_medium_and_serializes_lowercase() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        let json = serde_json::to_string(&Difficulty::Hard).expect("difficulty should serialize");
        assert_eq!(json, "\"hard\"");
        assert_eq!(Difficulty::Easy.to_string(), "easy");
    }
}
