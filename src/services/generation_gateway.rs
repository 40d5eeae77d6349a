use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    constants::quiz_prompt::quiz_system_prompt,
    errors::{AppError, AppResult},
    models::domain::GenerationRequest,
};

/// Boundary to the text-generation service. Every failure surfaces as `GenerationError`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatCompletionRequest {
    pub fn for_quiz(model: &str, request: &GenerationRequest) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: quiz_system_prompt(request.question_count, request.difficulty),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.subject_text.clone(),
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Turns an upstream status and body into the generated text (`choices[0].message.content`).
pub fn completion_content(status: StatusCode, body: &str) -> AppResult<String> {
    if !status.is_success() {
        log::error!("AI gateway error ({}): {}", status, body);
        return Err(AppError::GenerationError(format!(
            "upstream returned {}: {}",
            status, body
        )));
    }

    let response: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        AppError::GenerationError(format!("upstream response is not a chat completion: {}", e))
    })?;

    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| AppError::GenerationError("upstream response has no choices".to_string()))
}

pub struct HttpGenerationGateway {
    client: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<SecretString>,
}

impl HttpGenerationGateway {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.gateway_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.gateway_url.clone(),
            model: config.gateway_model.clone(),
            api_key: config.gateway_api_key.clone(),
        })
    }
}

#[async_trait]
impl GenerationGateway for HttpGenerationGateway {
    async fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            AppError::GenerationError("LOVABLE_API_KEY is not configured".to_string())
        })?;

        let body = ChatCompletionRequest::for_quiz(&self.model, request);
        log::info!(
            "Requesting {} {} questions from {}",
            request.question_count,
            request.difficulty,
            self.model
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        completion_content(status, &text)
    }
}
