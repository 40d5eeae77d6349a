//! Recovers a validated question set from free-form generator output.
//!
//! The generator is asked for a bare JSON array but routinely wraps it in prose or
//! markdown fences. The parser locates the array, decodes it, and validates each
//! element on its own: broken elements are dropped, and only a result with no usable
//! question at all is an error.

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{
        quiz_question::{QuestionRejection, OPTION_COUNT},
        QuizQuestion, QuizSet,
    },
};

// First `[` through last `]`, across newlines.
static GREEDY_ARRAY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[\s\S]*\]").expect("GREEDY_ARRAY_REGEX is a valid regex pattern")
});

/// How the array span is located inside the raw generator text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// First `[` to last `]`. Breaks when prose after the array contains a `]`.
    #[default]
    Greedy,
    /// Bracket-depth scan that skips string literals; tries each candidate array in turn.
    Balanced,
}

impl FromStr for ExtractionStrategy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "greedy" => Ok(ExtractionStrategy::Greedy),
            "balanced" => Ok(ExtractionStrategy::Balanced),
            other => Err(AppError::ValidationError(format!(
                "Unknown extraction strategy '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QuizParser {
    strategy: ExtractionStrategy,
}

impl QuizParser {
    pub fn new(strategy: ExtractionStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    pub fn parse(&self, raw_text: &str) -> AppResult<QuizSet> {
        self.parse_limited(raw_text, usize::MAX)
    }

    /// Parses and keeps at most `limit` questions, in generator order.
    pub fn parse_limited(&self, raw_text: &str, limit: usize) -> AppResult<QuizSet> {
        let items = self.extract_items(raw_text)?;
        let item_count = items.len();

        let mut questions: Vec<QuizQuestion> = items
            .iter()
            .enumerate()
            .filter_map(|(position, item)| match decode_question(item) {
                Ok(question) => Some(question),
                Err(rejection) => {
                    log::warn!("Dropping generated question {}: {}", position, rejection);
                    None
                }
            })
            .collect();

        if questions.is_empty() {
            return Err(AppError::ParseError(format!(
                "none of the {} generated items were valid questions",
                item_count
            )));
        }

        let limit = limit.max(1);
        if questions.len() > limit {
            log::info!(
                "Generator returned {} valid questions, keeping the first {}",
                questions.len(),
                limit
            );
            questions.truncate(limit);
        }

        Ok(QuizSet::new(questions))
    }

    fn extract_items(&self, raw_text: &str) -> AppResult<Vec<Value>> {
        match self.strategy {
            ExtractionStrategy::Greedy => {
                let span = GREEDY_ARRAY_REGEX
                    .find(raw_text)
                    .ok_or_else(|| {
                        AppError::ParseError(format!(
                            "no JSON array found in generator output (length: {})",
                            raw_text.len()
                        ))
                    })?
                    .as_str();

                serde_json::from_str::<Vec<Value>>(span).map_err(|e| {
                    AppError::ParseError(format!("generator array is not valid JSON: {}", e))
                })
            }
            ExtractionStrategy::Balanced => {
                let mut found_candidate = false;
                for (start, _) in raw_text.match_indices('[') {
                    let Some(span) = balanced_array_at(raw_text, start) else {
                        continue;
                    };
                    found_candidate = true;
                    if let Ok(items) = serde_json::from_str::<Vec<Value>>(span) {
                        return Ok(items);
                    }
                }

                if found_candidate {
                    Err(AppError::ParseError(
                        "no bracketed span in generator output decodes as a JSON array".to_string(),
                    ))
                } else {
                    Err(AppError::ParseError(format!(
                        "no JSON array found in generator output (length: {})",
                        raw_text.len()
                    )))
                }
            }
        }
    }
}

/// Returns the span from `start` (a `[`) to its matching `]`, ignoring brackets
/// inside string literals.
fn balanced_array_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, ch) in text[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '[' if !in_string => depth += 1,
            ']' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

fn non_blank_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.trim().is_empty())
}

/// Validating decoder from one untyped generator item to a `QuizQuestion`.
fn decode_question(item: &Value) -> Result<QuizQuestion, QuestionRejection> {
    let object = item.as_object().ok_or(QuestionRejection::NotAnObject)?;

    let prompt = object
        .get("question")
        .and_then(non_blank_str)
        .ok_or(QuestionRejection::MissingPrompt)?;

    let raw_options = match object.get("options") {
        Some(Value::Array(items)) => items,
        _ => return Err(QuestionRejection::WrongOptionCount(0)),
    };
    if raw_options.len() != OPTION_COUNT {
        return Err(QuestionRejection::WrongOptionCount(raw_options.len()));
    }
    let mut options: [String; OPTION_COUNT] = Default::default();
    for (index, raw) in raw_options.iter().enumerate() {
        options[index] = non_blank_str(raw)
            .ok_or(QuestionRejection::InvalidOption(index))?
            .to_string();
    }

    let correct = object
        .get("correctAnswer")
        .and_then(Value::as_i64)
        .ok_or(QuestionRejection::MissingCorrectAnswer)?;
    if !(0..OPTION_COUNT as i64).contains(&correct) {
        return Err(QuestionRejection::CorrectAnswerOutOfRange(correct));
    }

    let explanation = match object.get("explanation") {
        None | Some(Value::Null) => "",
        Some(Value::String(text)) => text.as_str(),
        Some(_) => return Err(QuestionRejection::InvalidExplanation),
    };

    QuizQuestion::new(prompt, options, correct as usize, explanation)
}
