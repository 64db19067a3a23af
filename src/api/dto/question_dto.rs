//! 问答 DTO
//!
//! 定义表单和 JSON 接口的请求与响应数据结构。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::QuestionAndAnswer;

/// 表单提示信息
pub const QUESTION_REQUIRED_MESSAGE: &str = "Please enter a question.";

/// 首页提交的表单
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AskQuestionForm {
    /// 问题，缺失或只包含空白时校验失败
    #[validate(
        required(message = "Please enter a question."),
        custom(function = "validate_not_blank")
    )]
    #[serde(default)]
    pub next_question: Option<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message(Cow::Borrowed(QUESTION_REQUIRED_MESSAGE)));
    }
    Ok(())
}

/// 取出第一条可展示的校验信息
pub fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| QUESTION_REQUIRED_MESSAGE.to_string())
}

/// JSON 提问请求
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AskQuestionRequest {
    /// 问题，允许为空字符串
    pub question: Option<String>,
}

/// 问答响应
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionAnswerResponse {
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
}

impl From<&QuestionAndAnswer> for QuestionAnswerResponse {
    fn from(record: &QuestionAndAnswer) -> Self {
        Self {
            question: record.question().to_string(),
            answer: record.answer().to_string(),
            created_at: record.created_at(),
        }
    }
}

/// 历史记录响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub items: Vec<QuestionAnswerResponse>,
    pub total: usize,
}

impl From<Vec<QuestionAndAnswer>> for HistoryResponse {
    fn from(records: Vec<QuestionAndAnswer>) -> Self {
        let items: Vec<QuestionAnswerResponse> = records.iter().map(Into::into).collect();
        Self {
            total: items.len(),
            items,
        }
    }
}
