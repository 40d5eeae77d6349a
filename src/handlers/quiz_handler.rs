use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{
        request::{
            CompletionRequestDto, GenerateQuizRequestDto, StatsQueryDto, SubjectQuizRequestDto,
        },
        response::{CompletionResponseDto, GenerateQuizResponseDto},
    },
};

/// Generates questions from monument text supplied by the caller.
#[post("/api/generate-quiz")]
pub async fn generate_quiz(
    http_request: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;
    let difficulty = request.difficulty()?;
    let request_id = request_id_or_dash(&http_request);

    let questions = state
        .quiz_service
        .generate_from_text(&request.monument_text, difficulty, request.question_count)
        .await
        .map_err(|err| {
            log::warn!("[{}] Quiz generation from text failed: {}", request_id, err);
            err
        })?;

    log::info!("[{}] Generated {} questions from text", request_id, questions.len());
    Ok(HttpResponse::Ok().json(GenerateQuizResponseDto { questions }))
}

/// Generates questions for a stored monument.
#[post("/api/subjects/{id}/quiz")]
pub async fn generate_subject_quiz(
    http_request: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: Option<web::Json<SubjectQuizRequestDto>>,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    request.validate()?;
    let difficulty = request.difficulty()?;
    let request_id = request_id_or_dash(&http_request);

    let questions = state
        .quiz_service
        .start_for_subject(&id, difficulty, request.question_count)
        .await
        .map_err(|err| {
            log::warn!("[{}] Quiz for subject '{}' failed: {}", request_id, id, err);
            err
        })?;

    log::info!(
        "[{}] Generated {} questions for subject '{}'",
        request_id,
        questions.len(),
        id
    );
    Ok(HttpResponse::Ok().json(GenerateQuizResponseDto { questions }))
}

#[post("/api/quiz-completions")]
pub async fn record_completion(
    state: web::Data<AppState>,
    request: web::Json<CompletionRequestDto>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let record = state
        .quiz_service
        .reporter()
        .report(
            &request.subject_id,
            request.user_id.as_deref(),
            request.score,
            request.total_questions,
        )
        .await?;

    let response = CompletionResponseDto::from_record(record);
    if response.recorded {
        Ok(HttpResponse::Created().json(response))
    } else {
        Ok(HttpResponse::Accepted().json(response))
    }
}

/// Completion stats over all records, or one subject's when `subjectId` is given.
#[get("/api/quiz-completions/stats")]
pub async fn completion_stats(
    state: web::Data<AppState>,
    query: web::Query<StatsQueryDto>,
) -> Result<HttpResponse, AppError> {
    let reporter = state.quiz_service.reporter();
    let stats = match query.subject_id.as_deref() {
        Some(subject_id) => reporter.subject_completion_stats(subject_id).await?,
        None => reporter.completion_stats().await?,
    };
    Ok(HttpResponse::Ok().json(stats))
}

fn request_id_or_dash(req: &HttpRequest) -> String {
    get_request_id(req).unwrap_or_else(|| "-".to_string())
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App, HttpMessage};

    use crate::{
        config::Config,
        middleware::{RequestId, RequestIdMiddleware, REQUEST_ID_HEADER},
        services::{
            content_fetcher::ContentFetcher,
            generation_gateway::MockGenerationGateway,
            quiz_parser::QuizParser,
            quiz_service::QuizService,
            score_reporter::ScoreReporter,
        },
        test_utils::{
            fixtures::{raw_questions_array, test_subject},
            stubs::{StubCompletionRepository, StubSubjectRepository},
        },
    };

    fn state_with(gateway: MockGenerationGateway) -> AppState {
        let service = QuizService::new(
            ContentFetcher::new(Arc::new(StubSubjectRepository::with(test_subject()))),
            Arc::new(gateway),
            QuizParser::default(),
            ScoreReporter::new(Arc::new(StubCompletionRepository::default())),
        );
        AppState::from_parts(Arc::new(service), Config::test_config())
    }

    fn answering(raw: String) -> MockGenerationGateway {
        let mut gateway = MockGenerationGateway::new();
        gateway.expect_generate().returning(move |_| Ok(raw.clone()));
        gateway
    }

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_generate_quiz_returns_questions() {
        let state = state_with(answering(format!(
            "Here you go:\n{}",
            raw_questions_array(&[("Q1", 2), ("Q2", 0)])
        )));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-quiz")
            .set_json(serde_json::json!({"monumentText": "Hampi", "questionCount": 2}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["questions"].as_array().map(Vec::len), Some(2));
        assert_eq!(body["questions"][0]["correctAnswer"], 2);
    }

    #[actix_web::test]
    async fn test_generate_quiz_rejects_missing_text() {
        let mut gateway = MockGenerationGateway::new();
        gateway.expect_generate().times(0);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(gateway)))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-quiz")
            .set_json(serde_json::json!({"monumentText": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_generation_failure_is_server_error_with_message() {
        let mut gateway = MockGenerationGateway::new();
        gateway
            .expect_generate()
            .returning(|_| Err(AppError::GenerationError("upstream returned 500".to_string())));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(gateway)))
                .service(generate_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate-quiz")
            .set_json(serde_json::json!({"monumentText": "Hampi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "GENERATION_ERROR");
        assert!(body["error"].as_str().is_some_and(|e| e.contains("500")));
    }

    #[actix_web::test]
    async fn test_subject_quiz_for_unknown_subject_is_not_found() {
        let mut gateway = MockGenerationGateway::new();
        gateway.expect_generate().times(0);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(gateway)))
                .service(generate_subject_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/subjects/unknown/quiz")
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_subject_quiz_uses_stored_monument() {
        let state = state_with(answering(raw_questions_array(&[("Q1", 1)])));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(generate_subject_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/subjects/monument-1/quiz")
            .set_json(serde_json::json!({"difficulty": "easy"}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["questions"][0]["question"], "Q1");
    }

    #[actix_web::test]
    async fn test_subject_quiz_behind_request_id_middleware() {
        let state = state_with(answering(raw_questions_array(&[("Q1", 1)])));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(RequestIdMiddleware)
                .service(generate_subject_quiz),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/subjects/monument-1/quiz")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[::core::prelude::v1::test]
    fn test_request_id_falls_back_to_dash() {
        let req = test::TestRequest::default().to_http_request();
        assert_eq!(request_id_or_dash(&req), "-");

        req.extensions_mut().insert(RequestId("req-7".to_string()));
        assert_eq!(request_id_or_dash(&req), "req-7");
    }

    #[actix_web::test]
    async fn test_record_completion_and_stats() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(MockGenerationGateway::new())))
                .service(record_completion)
                .service(completion_stats),
        )
        .await;

        let signed_in = test::TestRequest::post()
            .uri("/api/quiz-completions")
            .set_json(serde_json::json!({
                "subjectId": "monument-1",
                "userId": "user-1",
                "score": 3,
                "totalQuestions": 5
            }))
            .to_request();
        let resp = test::call_service(&app, signed_in).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let anonymous = test::TestRequest::post()
            .uri("/api/quiz-completions")
            .set_json(serde_json::json!({
                "subjectId": "monument-1",
                "score": 5,
                "totalQuestions": 5
            }))
            .to_request();
        let resp = test::call_service(&app, anonymous).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let impossible_score = test::TestRequest::post()
            .uri("/api/quiz-completions")
            .set_json(serde_json::json!({
                "subjectId": "monument-1",
                "score": 9,
                "totalQuestions": 5
            }))
            .to_request();
        let resp = test::call_service(&app, impossible_score).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri("/api/quiz-completions/stats")
            .to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["totalCompletions"], 1);
        assert_eq!(stats["averageScorePercent"], 60);

        let req = test::TestRequest::get()
            .uri("/api/quiz-completions/stats?subjectId=other")
            .to_request();
        let stats: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(stats["totalCompletions"], 0);
    }
}
