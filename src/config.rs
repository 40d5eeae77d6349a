use std::env;
use secrecy::SecretString;

use crate::services::quiz_parser::ExtractionStrategy;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_GATEWAY_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub subjects_collection: String,
    pub completions_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub gateway_url: String,
    pub gateway_model: String,
    /// Absent key is only reported when a generation is attempted.
    pub gateway_api_key: Option<SecretString>,
    pub gateway_timeout_secs: u64,
    pub extraction_strategy: ExtractionStrategy,
}

/// Unset means the default strategy; an unknown value is reported and falls back to it.
fn extraction_strategy_from(value: Option<&str>) -> ExtractionStrategy {
    let Some(value) = value else {
        return ExtractionStrategy::default();
    };

    value.parse().unwrap_or_else(|err| {
        log::warn!(
            "QUIZ_EXTRACTION: {}; using {:?}",
            err,
            ExtractionStrategy::default()
        );
        ExtractionStrategy::default()
    })
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "arfolk-local".to_string()),
            subjects_collection: env::var("SUBJECTS_COLLECTION")
                .unwrap_or_else(|_| "monuments".to_string()),
            completions_collection: env::var("COMPLETIONS_COLLECTION")
                .unwrap_or_else(|_| "quiz_completions".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            gateway_url: env::var("AI_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            gateway_model: env::var("AI_GATEWAY_MODEL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_MODEL.to_string()),
            gateway_api_key: env::var("LOVABLE_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            gateway_timeout_secs: env::var("AI_GATEWAY_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(120),
            extraction_strategy: extraction_strategy_from(
                env::var("QUIZ_EXTRACTION").ok().as_deref(),
            ),
        }
    }

    /// Logs a warning for settings that make quiz generation impossible.
    pub fn warn_if_incomplete(&self) {
        if self.gateway_api_key.is_none() {
            log::warn!("LOVABLE_API_KEY is not configured; quiz generation requests will fail");
        }
        if self.gateway_timeout_secs == 0 {
            log::warn!("AI_GATEWAY_TIMEOUT_SECS is 0; generation requests will time out immediately");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "arfolk-test".to_string(),
            subjects_collection: "monuments".to_string(),
            completions_collection: "quiz_completions".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            gateway_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            gateway_model: DEFAULT_GATEWAY_MODEL.to_string(),
            gateway_api_key: Some(SecretString::from("test_gateway_key".to_string())),
            gateway_timeout_secs: 5,
            extraction_strategy: ExtractionStrategy::Greedy,
        }
    }
}
