//! 数据模型模块

pub mod question_answer;

pub use question_answer::QuestionAndAnswer;
