use chrono::{DateTime, Utc};
use serde::Serialize;

/// 问答记录
///
/// 一次提问产生一条记录，创建后不可修改。`created_at` 在创建时确定，
/// 未显式指定时取当前 UTC 时间。
///
/// 记录只能由代码构造，不能从外部数据反序列化：
///
/// ```compile_fail
/// let _: eightball::models::QuestionAndAnswer =
///     serde_json::from_str(r#"{"question":"q","answer":"made up","created_at":"2024-01-01T00:00:00Z"}"#).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionAndAnswer {
    question: String,
    answer: String,
    created_at: DateTime<Utc>,
}

impl QuestionAndAnswer {
    /// 使用当前时间创建记录
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self::with_created_at(question, answer, Utc::now())
    }

    /// 使用指定时间创建记录
    pub fn with_created_at(
        question: impl Into<String>,
        answer: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            created_at,
        }
    }

    /// 问题文本
    pub fn question(&self) -> &str {
        &self.question
    }

    /// 答案文本
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// 创建时间
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
