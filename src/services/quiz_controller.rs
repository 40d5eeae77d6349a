//! Owns one view's quiz attempt and discards generation results that arrive late.
//!
//! Every load gets a ticket carrying a monotonically increasing token. Starting a new
//! load, retaking the quiz or navigating away bumps the token, so a result that
//! resolves for an older ticket is ignored instead of replacing the newer quiz.

use crate::{
    errors::{AppError, AppResult},
    models::domain::{Difficulty, QuizSet},
    services::{
        quiz_service::QuizService,
        quiz_session::{QuizResult, QuizSession},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    token: u64,
}

#[derive(Clone, Debug)]
pub enum ControllerState {
    Idle,
    Loading { token: u64 },
    Failed(AppError),
    Active(QuizSession),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Stale,
}

#[derive(Debug)]
pub struct QuizController {
    subject_id: String,
    token: u64,
    state: ControllerState,
    completion_reported: bool,
}

impl QuizController {
    pub fn new(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            token: 0,
            state: ControllerState::Idle,
            completion_reported: false,
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ControllerState::Loading { .. })
    }

    pub fn failure(&self) -> Option<&AppError> {
        match &self.state {
            ControllerState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            ControllerState::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        match &mut self.state {
            ControllerState::Active(session) => Some(session),
            _ => None,
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.token += 1;
        self.state = ControllerState::Loading { token: self.token };
        self.completion_reported = false;
        LoadTicket { token: self.token }
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        matches!(self.state, ControllerState::Loading { token } if token == ticket.token)
    }

    /// Applies a generation result if `ticket` is still the latest load.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: AppResult<QuizSet>) -> LoadOutcome {
        if !self.is_current(ticket) {
            log::debug!(
                "Ignoring stale quiz for '{}' (ticket {}, current {})",
                self.subject_id,
                ticket.token,
                self.token
            );
            return LoadOutcome::Stale;
        }

        self.state = match result.and_then(QuizSession::start) {
            Ok(session) => ControllerState::Active(session),
            Err(err) => {
                log::warn!("Quiz for '{}' could not be started: {}", self.subject_id, err);
                ControllerState::Failed(err)
            }
        };
        LoadOutcome::Applied
    }

    /// Drops the current attempt and any in-flight load (retake or navigation away).
    pub fn invalidate(&mut self) {
        self.token += 1;
        self.state = ControllerState::Idle;
        self.completion_reported = false;
    }

    pub async fn load(
        &mut self,
        service: &QuizService,
        difficulty: Option<Difficulty>,
        question_count: Option<u16>,
    ) -> LoadOutcome {
        let ticket = self.begin_load();
        let result = service
            .start_for_subject(&self.subject_id, difficulty, question_count)
            .await;
        self.complete_load(ticket, result)
    }

    /// Reports the finished session once; later calls only return the result.
    pub async fn finish(
        &mut self,
        service: &QuizService,
        user_id: Option<&str>,
    ) -> AppResult<QuizResult> {
        let session = self.session().ok_or_else(|| {
            AppError::InvalidTransition("no active quiz session".to_string())
        })?;

        if self.completion_reported {
            return session.result().ok_or_else(|| {
                AppError::InvalidTransition("session has not been completed".to_string())
            });
        }

        let result = service.finish(&self.subject_id, user_id, session).await?;
        self.completion_reported = true;
        Ok(result)
    }
}
