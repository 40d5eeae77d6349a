pub mod content_fetcher;
pub mod generation_gateway;
pub mod prompt_builder;
pub mod quiz_controller;
pub mod quiz_parser;
pub mod quiz_service;
pub mod quiz_session;
pub mod score_reporter;
