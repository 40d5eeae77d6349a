use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use arfolk_quiz::{
    app_state::AppState,
    config::Config,
    handlers::{
        completion_stats, generate_quiz, generate_subject_quiz, health_check, record_completion,
    },
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.warn_if_incomplete();
    let bind_address = (config.web_server_host.clone(), config.web_server_port);

    let state = AppState::new(config)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    log::info!(
        "Starting HTTP server on {}:{}",
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allowed_headers(vec![
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::HeaderName::from_static("x-client-info"),
                header::HeaderName::from_static("apikey"),
            ]);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .service(health_check)
            .service(generate_quiz)
            .service(generate_subject_quiz)
            .service(record_completion)
            .service(completion_stats)
    })
    .bind(bind_address)?
    .run()
    .await
}
