//! API 模块
//!
//! 提供页面和 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod views;

use crate::api::app_state::AppState;
use crate::observability::{ObservabilityState, create_observability_router, metrics_middleware};
use crate::security::middleware::security_headers_middleware;
use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 组装完整路由：页面、`/api/v1` 与健康检查/指标端点共享同一组中间件
pub fn create_router(app_state: AppState, observability: Arc<ObservabilityState>) -> Router {
    let api = Router::new().merge(routes::question_routes::create_question_router());
    let metrics = app_state.metrics.clone();

    Router::new()
        .merge(routes::home_routes::create_home_router())
        .nest("/api/v1", api)
        .with_state(app_state)
        .merge(create_observability_router(observability))
        .layer(from_fn_with_state(metrics, metrics_middleware))
        // Add security headers middleware to all routes
        .layer(from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
}
