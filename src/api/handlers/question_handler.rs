use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::{debug, info};

use crate::{
    api::{app_state::AppState, dto::question_dto::*},
    error::AppError,
};

pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Answering question via API");

    let record = state.ask(request.question.as_deref()).await?;

    Ok((
        StatusCode::CREATED,
        Json(QuestionAnswerResponse::from(&record)),
    ))
}

pub async fn list_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    debug!("Listing question history");
    Json(HistoryResponse::from(state.question_service.get_all()))
}

pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if !state.settings.allow_history_reset {
        return Err(AppError::Forbidden("history reset is disabled".to_string()));
    }

    state.question_service.clear();
    info!("Question history cleared");
    Ok(StatusCode::NO_CONTENT)
}
