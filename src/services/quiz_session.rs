//! Linear answer → feedback → advance state machine for one quiz attempt.

use serde::Serialize;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{quiz_question::OPTION_COUNT, QuizQuestion, QuizSet},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Ready,
    Answered { selected: usize },
    Completed,
}

/// What the caller shows once a choice is locked in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    pub selected: usize,
    pub correct_index: usize,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Excellent,
    GoodJob,
    KeepLearning,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Excellent => "Excellent!",
            Verdict::GoodJob => "Good job!",
            Verdict::KeepLearning => "Keep learning!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }

    pub fn verdict(&self) -> Verdict {
        let percentage = self.percentage();
        if percentage >= 80.0 {
            Verdict::Excellent
        } else if percentage >= 60.0 {
            Verdict::GoodJob
        } else {
            Verdict::KeepLearning
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionProgress {
    Next { index: usize },
    Completed(QuizResult),
}

#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: QuizSet,
    current_index: usize,
    state: SessionState,
    score: usize,
}

impl QuizSession {
    pub fn start(questions: QuizSet) -> AppResult<Self> {
        if questions.is_empty() {
            return Err(AppError::EmptySetError(
                "cannot start a session without questions".to_string(),
            ));
        }

        Ok(Self {
            questions,
            current_index: 0,
            state: SessionState::Ready,
            score: 0,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        match self.state {
            SessionState::Answered { selected } => Some(selected),
            _ => None,
        }
    }

    /// The question being shown. `None` once the session is completed.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.is_completed() {
            return None;
        }
        self.questions.get(self.current_index)
    }

    pub fn is_completed(&self) -> bool {
        self.state == SessionState::Completed
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.questions.len()
    }

    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn result(&self) -> Option<QuizResult> {
        self.is_completed().then(|| QuizResult {
            score: self.score,
            total: self.total(),
        })
    }

    /// Locks in an answer for the current question. The first answer is final:
    /// repeating it is accepted, choosing a different option is rejected.
    pub fn select_answer(&mut self, choice: usize) -> AppResult<AnswerFeedback> {
        match self.state {
            SessionState::Ready => {}
            SessionState::Answered { selected } if selected == choice => {}
            SessionState::Answered { selected } => {
                return Err(AppError::InvalidTransition(format!(
                    "question {} was already answered with option {}",
                    self.current_index, selected
                )));
            }
            SessionState::Completed => {
                return Err(AppError::InvalidTransition(
                    "session is already completed".to_string(),
                ));
            }
        }

        if choice >= OPTION_COUNT {
            return Err(AppError::ValidationError(format!(
                "option {} does not exist, expected 0..{}",
                choice, OPTION_COUNT
            )));
        }

        let question = self.questions.get(self.current_index).ok_or_else(|| {
            AppError::InternalError(format!("no question at index {}", self.current_index))
        })?;

        self.state = SessionState::Answered { selected: choice };

        Ok(AnswerFeedback {
            selected: choice,
            correct_index: question.correct_index(),
            is_correct: question.is_correct(choice),
            explanation: question.explanation().to_string(),
        })
    }

    /// Scores the answered question and moves forward, or completes the session.
    pub fn advance(&mut self) -> AppResult<SessionProgress> {
        let selected = match self.state {
            SessionState::Answered { selected } => selected,
            SessionState::Ready => {
                return Err(AppError::InvalidTransition(format!(
                    "question {} has not been answered",
                    self.current_index
                )));
            }
            SessionState::Completed => {
                return Err(AppError::InvalidTransition(
                    "session is already completed".to_string(),
                ));
            }
        };

        let question = self.questions.get(self.current_index).ok_or_else(|| {
            AppError::InternalError(format!("no question at index {}", self.current_index))
        })?;
        if question.is_correct(selected) {
            self.score += 1;
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.state = SessionState::Ready;
            Ok(SessionProgress::Next {
                index: self.current_index,
            })
        } else {
            self.state = SessionState::Completed;
            Ok(SessionProgress::Completed(QuizResult {
                score: self.score,
                total: self.total(),
            }))
        }
    }
}
