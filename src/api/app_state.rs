use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::views::Views;
use crate::config::AnswerGeneratorConfig;
use crate::error::Result;
use crate::models::QuestionAndAnswer;
use crate::observability::AppMetrics;
use crate::services::answer_generator::AnswerGenerator;
use crate::services::history::QuestionAnswerService;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Maps questions to canned answers
    pub answer_generator: Arc<dyn AnswerGenerator>,
    /// Question/answer history
    pub question_service: Arc<dyn QuestionAnswerService>,
    /// Page templates
    pub views: Arc<Views>,
    /// Answer generator settings
    pub settings: Arc<AnswerGeneratorConfig>,
    /// Request and question counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("answer_generator", &"Arc<dyn AnswerGenerator>")
            .field("question_service", &"Arc<dyn QuestionAnswerService>")
            .field("views", &"Arc<Views>")
            .field("settings", &self.settings)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        answer_generator: Arc<dyn AnswerGenerator>,
        question_service: Arc<dyn QuestionAnswerService>,
        settings: AnswerGeneratorConfig,
        metrics: Arc<AppMetrics>,
    ) -> Result<Self> {
        Ok(Self {
            answer_generator,
            question_service,
            views: Arc::new(Views::new()?),
            settings: Arc::new(settings),
            metrics,
        })
    }

    /// Answer a question and prepend the resulting record to the history.
    ///
    /// Nothing is stored when the generator fails.
    pub async fn ask(&self, question: Option<&str>) -> Result<QuestionAndAnswer> {
        let answer = self.answer_generator.generate_answer_async(question).await?;
        let record =
            QuestionAndAnswer::with_created_at(question.unwrap_or_default(), answer, Utc::now());

        self.question_service.add(record.clone());
        self.metrics.record_question();

        info!(
            question = record.question(),
            answer = record.answer(),
            "Added new question and answer"
        );
        Ok(record)
    }
}
