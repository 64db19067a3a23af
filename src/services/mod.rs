//! 服务模块

pub mod answer_generator;
pub mod history;

pub use answer_generator::{
    ANSWERS, AnswerGenerator, DeterministicAnswerGenerator, create_answer_generator,
    is_known_answer, select_answer,
};
pub use history::{
    InMemoryQuestionAnswerService, QuestionAnswerService, create_question_answer_service,
};
