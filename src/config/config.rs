use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式（JSON）
    pub structured: bool,
    /// 日志文件目录，未设置时只输出到标准输出
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            structured: false,
            log_dir: None,
        }
    }
}

/// 答案生成器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerGeneratorConfig {
    /// 首页展示的最大问答数量（1..=1000）
    pub max_stored_questions: usize,
    /// 页面标题
    pub application_title: String,
    /// 应用描述
    pub application_description: String,
    /// 是否开放清空历史的接口
    pub allow_history_reset: bool,
}

impl Default for AnswerGeneratorConfig {
    fn default() -> Self {
        Self {
            max_stored_questions: 100,
            application_title: "Magic 8-Ball Random Answer Generator".into(),
            application_description: "A Magic 8-Ball style answer generator built with Rust"
                .into(),
            allow_history_reset: true,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 答案生成器配置
    pub answer_generator: AnswerGeneratorConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            answer_generator: AnswerGeneratorConfig::default(),
            app_name: "eightball".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config.answer_generator.allow_history_reset = false;
        config
    }
}
