use eightball::api::{self, app_state::AppState};
use eightball::config::ConfigLoader;
use eightball::observability::{
    AnswerGeneratorHealthCheck, AppMetrics, ObservabilityState, init_tracing,
};
use eightball::services::{
    AnswerGenerator, QuestionAnswerService, create_answer_generator,
    create_question_answer_service,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load()?;
    ConfigLoader::validate(&config)?;

    // 必须保持存活，否则文件日志会丢失
    let _log_guard = init_tracing(&config.logging)?;

    let settings = &config.answer_generator;
    info!(app_name = %config.app_name, "Starting {}", settings.application_title);
    info!("Environment: {}", config.environment);
    info!(
        max_stored_questions = settings.max_stored_questions,
        allow_history_reset = settings.allow_history_reset,
        "Configuration loaded successfully"
    );

    let answer_generator: Arc<dyn AnswerGenerator> = Arc::from(create_answer_generator());
    let question_service: Arc<dyn QuestionAnswerService> =
        Arc::from(create_question_answer_service());
    let metrics = Arc::new(AppMetrics::default());
    info!("Services initialized");

    let app_state = AppState::new(
        answer_generator,
        question_service,
        settings.clone(),
        metrics.clone(),
    )?;
    info!("Application state created");

    let observability_state = Arc::new(ObservabilityState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        metrics,
        AnswerGeneratorHealthCheck::new(
            app_state.answer_generator.clone(),
            settings.max_stored_questions,
        ),
    ));
    let router = api::create_router(app_state, observability_state);
    info!("Router created with observability endpoints");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
