//! Home Routes
//!
//! 页面路由：首页表单和关于页。

use axum::{Router, routing::get};

use crate::api::{app_state::AppState, handlers::home_handler::*};

/// 创建页面路由器
pub fn create_home_router() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(ask))
        .route("/about", get(about))
}
