use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    api::{
        app_state::AppState,
        dto::question_dto::{AskQuestionForm, first_validation_message},
        views::{HistoryRow, IndexPage},
    },
    error::AppError,
};

const GENERAL_ERROR_MESSAGE: &str =
    "An error occurred while processing your question. Please try again.";

/// 渲染首页，只展示最近的 `max_stored_questions` 条记录
fn render_index(
    state: &AppState,
    question: &str,
    field_error: Option<String>,
    general_error: Option<String>,
) -> Result<String, AppError> {
    let history = state
        .question_service
        .get_all()
        .iter()
        .take(state.settings.max_stored_questions)
        .map(HistoryRow::from)
        .collect();

    state.views.render_index(&IndexPage {
        title: &state.settings.application_title,
        description: &state.settings.application_description,
        question,
        field_error,
        general_error,
        history,
    })
}

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    info!("Displaying questions and answers page");
    render_index(&state, "", None, None).map(Html)
}

pub async fn ask(
    State(state): State<AppState>,
    form: Result<Form<AskQuestionForm>, FormRejection>,
) -> Result<Response, AppError> {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable question submission");
            state.metrics.record_validation_failure();
            let body = render_index(&state, "", None, Some(GENERAL_ERROR_MESSAGE.to_string()))?;
            return Ok((rejection.status(), Html(body)).into_response());
        }
    };

    if let Err(errors) = form.validate() {
        warn!("Invalid question submission");
        state.metrics.record_validation_failure();
        let body = render_index(
            &state,
            form.next_question.as_deref().unwrap_or_default(),
            Some(first_validation_message(&errors)),
            None,
        )?;
        return Ok(Html(body).into_response());
    }

    let question = form.next_question.unwrap_or_default();
    info!(question = %question, "Processing question");

    match state.ask(Some(&question)).await {
        // Post/Redirect/Get
        Ok(_) => Ok(Redirect::to("/").into_response()),
        Err(e) => {
            error!(error = %e, question = %question, "Error processing question");
            let body = render_index(
                &state,
                &question,
                None,
                Some(GENERAL_ERROR_MESSAGE.to_string()),
            )?;
            Ok((StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response())
        }
    }
}

pub async fn about(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    info!("Displaying about page");
    state
        .views
        .render_about(
            &state.settings.application_title,
            &state.settings.application_description,
        )
        .map(Html)
}
