//! Question Routes
//!
//! 定义问答相关的 JSON API 路由。

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::{app_state::AppState, handlers::question_handler::*};

/// 创建问答路由器
pub fn create_question_router() -> Router<AppState> {
    Router::new()
        .route("/answers", post(ask_question))
        .route("/history", get(list_history).delete(clear_history))
}
