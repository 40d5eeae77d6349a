use serde::Serialize;
use thiserror::Error;

pub const OPTION_COUNT: usize = 4;

/// Why a generated question was refused. Refused items are dropped, never patched.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuestionRejection {
    #[error("item is not an object")]
    NotAnObject,
    #[error("question text is missing or blank")]
    MissingPrompt,
    #[error("options must be a list of exactly 4 entries, found {0}")]
    WrongOptionCount(usize),
    #[error("option {0} is not a non-blank string")]
    InvalidOption(usize),
    #[error("correctAnswer is missing or not an integer")]
    MissingCorrectAnswer,
    #[error("correctAnswer {0} is outside 0..=3")]
    CorrectAnswerOutOfRange(i64),
    #[error("explanation is not text")]
    InvalidExplanation,
}

/// A validated multiple-choice question. Serializes in the generator's wire shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    prompt: String,
    options: [String; OPTION_COUNT],
    #[serde(rename = "correctAnswer")]
    correct_index: usize,
    explanation: String,
}

impl QuizQuestion {
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_index: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuestionRejection> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionRejection::MissingPrompt);
        }
        if let Some(position) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionRejection::InvalidOption(position));
        }
        if correct_index >= OPTION_COUNT {
            return Err(QuestionRejection::CorrectAnswerOutOfRange(
                correct_index as i64,
            ));
        }

        Ok(Self {
            prompt,
            options,
            correct_index,
            explanation: explanation.into(),
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// Ordered questions as produced by the parser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuizSet {
    questions: Vec<QuizQuestion>,
}

impl QuizSet {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuizQuestion> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuizQuestion> {
        self.questions.iter()
    }
}

impl<'a> IntoIterator for &'a QuizSet {
    type Item = &'a QuizQuestion;
    type IntoIter = std::slice::Iter<'a, QuizQuestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
