use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Fetch error: {0}")]
    FetchError(String),

    #[error("Generation error: {0}")]
    GenerationError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Empty quiz: {0}")]
    EmptySetError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::FetchError(_) => "FETCH_ERROR",
            AppError::GenerationError(_) => "GENERATION_ERROR",
            AppError::ParseError(_) => "PARSE_ERROR",
            AppError::EmptySetError(_) => "EMPTY_SET_ERROR",
            AppError::ReportError(_) => "REPORT_ERROR",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::DatabaseError(_) => "DATABASE_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the user should be offered a retry of quiz generation.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::GenerationError(_) | AppError::ParseError(_) | AppError::EmptySetError(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::FetchError(_) => StatusCode::NOT_FOUND,
            AppError::GenerationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ParseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::EmptySetError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ReportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidTransition(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
        })
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::GenerationError(format!("upstream request timed out: {}", err))
        } else {
            AppError::GenerationError(format!("upstream request failed: {}", err))
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
