//! 可观测性模块
//!
//! 提供 Prometheus 格式指标、结构化日志和健康检查。

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, error, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::config::LoggingConfig;
use crate::services::answer_generator::{ALGORITHM_VERSION, AnswerGenerator};

// ===== Simple Metrics =====

/// 简单应用指标
#[derive(Debug, Default)]
pub struct AppMetrics {
    pub http_requests_total: AtomicU64,
    pub http_request_duration_sum: AtomicU64,
    pub questions_answered_total: AtomicU64,
    pub validation_failures_total: AtomicU64,
    pub errors_total: AtomicU64,
}

impl AppMetrics {
    /// 记录 HTTP 请求
    pub fn record_http_request(&self, duration_ms: u64) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.http_request_duration_sum
            .fetch_add(duration_ms, Ordering::Relaxed);
    }

    /// 记录一次成功的问答
    pub fn record_question(&self) {
        self.questions_answered_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录输入校验失败
    pub fn record_validation_failure(&self) {
        self.validation_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 记录错误
    pub fn record_error(&self) {
        self.errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        let requests = self.http_requests_total.load(Ordering::Relaxed);
        format!(
            r#"# HELP http_requests_total Total HTTP requests
# TYPE http_requests_total counter
http_requests_total {}
# HELP http_request_duration_seconds HTTP request duration in seconds
# TYPE http_request_duration_seconds summary
http_request_duration_seconds_sum {}
http_request_duration_seconds_count {}
# HELP questions_answered_total Questions answered and stored
# TYPE questions_answered_total counter
questions_answered_total {}
# HELP validation_failures_total Rejected question submissions
# TYPE validation_failures_total counter
validation_failures_total {}
# HELP errors_total Total errors
# TYPE errors_total counter
errors_total {}
"#,
            requests,
            self.http_request_duration_sum.load(Ordering::Relaxed) as f64 / 1000.0,
            requests,
            self.questions_answered_total.load(Ordering::Relaxed),
            self.validation_failures_total.load(Ordering::Relaxed),
            self.errors_total.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

/// 健康状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthState {
    /// 多项检查合并后的整体状态，取最差的一项
    pub fn aggregate<'a>(states: impl IntoIterator<Item = &'a HealthState>) -> HealthState {
        states
            .into_iter()
            .fold(HealthState::Healthy, |acc, s| match (acc, s) {
                (HealthState::Unhealthy, _) | (_, HealthState::Unhealthy) => {
                    HealthState::Unhealthy
                }
                (HealthState::Degraded, _) | (_, HealthState::Degraded) => HealthState::Degraded,
                _ => HealthState::Healthy,
            })
    }

    pub fn status_code(self) -> StatusCode {
        match self {
            HealthState::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::OK,
        }
    }
}

/// 健康检查状态
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    pub checks: Vec<HealthCheckResult>,
}

/// 单个健康检查结果
#[derive(Debug, Clone, Serialize)]
pub struct HealthCheckResult {
    pub name: String,
    pub status: HealthState,
    pub description: String,
    pub latency_ms: u64,
    pub data: serde_json::Map<String, serde_json::Value>,
}

/// 答案生成器健康检查
///
/// 用固定问题调用一次生成器，并检查配置是否可用。
#[derive(Clone)]
pub struct AnswerGeneratorHealthCheck {
    generator: Arc<dyn AnswerGenerator>,
    max_stored_questions: usize,
}

impl AnswerGeneratorHealthCheck {
    pub const NAME: &'static str = "answer_generator";
    const PROBE_QUESTION: &'static str = "Health check test question";

    pub fn new(generator: Arc<dyn AnswerGenerator>, max_stored_questions: usize) -> Self {
        Self {
            generator,
            max_stored_questions,
        }
    }

    pub fn run(&self) -> HealthCheckResult {
        let start = Instant::now();
        let outcome = self.generator.generate_answer(Some(Self::PROBE_QUESTION));
        let latency_ms = start.elapsed().as_millis() as u64;

        let result = |status: HealthState,
                      description: &str,
                      data: serde_json::Map<String, serde_json::Value>| HealthCheckResult {
            name: Self::NAME.to_string(),
            status,
            description: description.to_string(),
            latency_ms,
            data,
        };

        let answer = match outcome {
            Ok(answer) if !answer.is_empty() => answer,
            Ok(_) => {
                warn!("Answer generator returned an empty answer");
                return result(
                    HealthState::Unhealthy,
                    "Answer generator returned an empty answer",
                    Default::default(),
                );
            }
            Err(e) => {
                error!(error = %e, "Answer generator health check failed");
                return result(
                    HealthState::Unhealthy,
                    "Answer generator health check failed",
                    Default::default(),
                );
            }
        };

        if self.max_stored_questions == 0 {
            warn!("Invalid configuration: max_stored_questions must be greater than 0");
            return result(
                HealthState::Degraded,
                "Invalid configuration detected",
                Default::default(),
            );
        }

        let mut data = serde_json::Map::new();
        data.insert(
            "max_stored_questions".into(),
            self.max_stored_questions.into(),
        );
        data.insert("test_answer".into(), answer.into());

        debug!("Answer generator health check passed");
        result(
            HealthState::Healthy,
            "Answer generator is functioning correctly",
            data,
        )
    }
}

/// 可观测性路由共享状态
#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub answer_check: AnswerGeneratorHealthCheck,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(
        version: String,
        metrics: Arc<AppMetrics>,
        answer_check: AnswerGeneratorHealthCheck,
    ) -> Self {
        Self {
            metrics,
            answer_check,
            start_time: Utc::now(),
            version,
        }
    }

    /// 执行全部健康检查
    pub fn run_checks(&self) -> Vec<HealthCheckResult> {
        vec![self.answer_check.run()]
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

// ===== Health Check Handlers =====

/// 获取完整健康状态
pub async fn health_check(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.run_checks();
    let status = HealthState::aggregate(checks.iter().map(|c| &c.status));

    let health_status = HealthStatus {
        status,
        timestamp: Utc::now().to_rfc3339(),
        version: state.version.clone(),
        uptime_seconds: state.uptime_seconds(),
        checks,
    };

    (status.status_code(), Json(health_status))
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// 就绪检查
pub async fn readiness(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    let checks = state.run_checks();
    match HealthState::aggregate(checks.iter().map(|c| &c.status)) {
        HealthState::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, "Not Ready"),
        _ => (StatusCode::OK, "Ready"),
    }
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    (StatusCode::OK, state.metrics.gather())
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "algorithm_version": ALGORITHM_VERSION,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness))
        .route("/health/ready", get(readiness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化结构化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时写入按天滚动的日志文件，
/// 返回的 guard 必须在进程退出前保持存活。
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "eightball.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_line_number(true)
        .with_writer(writer);

    let installed = if config.structured {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(guard)
}

// ===== Request Metrics Middleware =====

/// 记录请求指标的中间件
pub async fn metrics_middleware(
    State(metrics): State<Arc<AppMetrics>>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let response = next.run(req).await;

    metrics.record_http_request(start.elapsed().as_millis() as u64);
    if response.status().is_server_error() {
        metrics.record_error();
    }

    response
}
