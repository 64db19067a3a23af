use crate::config::config::AppConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "EIGHTBALL_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 合并顺序（后者覆盖前者）：
    /// 1. 内置默认值（`EIGHTBALL_ENVIRONMENT=production` 时使用生产默认值）
    /// 2. ./config.toml
    /// 3. 环境变量，例如 `EIGHTBALL_SERVER__PORT=9000`
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        let defaults = match std::env::var(format!("{}ENVIRONMENT", ENV_PREFIX)) {
            Ok(env) if env.eq_ignore_ascii_case("production") => AppConfig::production(),
            _ => AppConfig::development(),
        };

        Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        let max = config.answer_generator.max_stored_questions;
        if !(1..=1000).contains(&max) {
            return Err(ConfigValidationError::InvalidMaxStoredQuestions(max));
        }

        if config.answer_generator.application_title.trim().is_empty() {
            return Err(ConfigValidationError::MissingField("application_title"));
        }

        if config.answer_generator.application_description.trim().is_empty() {
            return Err(ConfigValidationError::MissingField(
                "application_description",
            ));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("max_stored_questions 必须在 1 到 1000 之间，当前值: {0}")]
    InvalidMaxStoredQuestions(usize),

    #[error("必填配置项缺失: {0}")]
    MissingField(&'static str),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
