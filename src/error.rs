//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 必需参数缺失
    #[error("无效参数: {0}")]
    InvalidArgument(String),

    /// 操作被禁止
    #[error("操作被禁止: {0}")]
    Forbidden(String),

    /// 模板渲染错误
    #[error("模板渲染错误: {0}")]
    Template(String),
}

impl AppError {
    /// 构造缺失参数错误
    pub fn missing(argument: &str) -> Self {
        AppError::InvalidArgument(format!("`{}` must be provided", argument))
    }
}

impl From<minijinja::Error> for AppError {
    fn from(e: minijinja::Error) -> Self {
        AppError::Template(e.to_string())
    }
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let body = Json(ErrorResponse::new(&code, &self.to_string()));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
    /// 请求 ID
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
            request_id: None,
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::InvalidArgument(_) => (400, "INVALID_ARGUMENT".to_string()),
            AppError::Forbidden(_) => (403, "FORBIDDEN".to_string()),
            AppError::Template(_) => (500, "TEMPLATE_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::missing("question"), 400, "INVALID_ARGUMENT"),
            (AppError::Forbidden("reset".into()), 403, "FORBIDDEN"),
            (AppError::Template("boom".into()), 500, "TEMPLATE_ERROR"),
        ];

        for (err, status, code) in cases {
            let (s, c): (u16, String) = (&err).into();
            assert_eq!(s, status);
            assert_eq!(c, code);
        }
    }

    #[test]
    fn test_missing_argument_message() {
        let err = AppError::missing("question");
        assert!(err.to_string().contains("`question` must be provided"));
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::Forbidden("disabled".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_template_error_body() {
        let source = minijinja::Environment::new()
            .template_from_str("{{ broken")
            .unwrap_err();
        let response = AppError::from(source).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "TEMPLATE_ERROR");
        assert!(body["details"].is_null());
    }
}
