//! 服务配置
//!
//! 全部来自环境变量（键名不区分大小写）：
//!
//! | 变量 | 默认值 |
//! |------|--------|
//! | `DATABASE_URL` | 必填 |
//! | `PORT` | `8080` |
//! | `LOG_LEVEL` | `info`（`RUST_LOG` 优先） |
//! | `REQUEST_TIMEOUT_MS` | `10000` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `CONNECT_RETRY_INTERVAL_MS` | `2000` |
//! | `CONNECT_RETRY_MAX_INTERVAL_MS` | 同 `CONNECT_RETRY_INTERVAL_MS` |
//! | `CONNECT_RETRY_MAX_ATTEMPTS` | 不限 |

use std::net::SocketAddr;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment};
use serde::Deserialize;

use crate::retry::RetryPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Source(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// 存储连接串
    #[serde(default)]
    pub database_url: String,

    /// 远程调用监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 单次调用的截止时间
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,

    #[serde(default = "default_retry_interval_ms")]
    pub connect_retry_interval_ms: u64,

    /// 退避上限；为空时等于 `connect_retry_interval_ms`（固定间隔）
    #[serde(default)]
    pub connect_retry_max_interval_ms: Option<u64>,

    /// 为空表示无限重试
    #[serde(default)]
    pub connect_retry_max_attempts: Option<u32>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_retry_interval_ms() -> u64 {
    2_000
}

impl ServiceConfig {
    /// 从进程环境变量加载并校验
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::default())
    }

    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let config: Self = ConfigBuilder::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("DATABASE_URL must be set".to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "REQUEST_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }
        if self.db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "DB_MAX_CONNECTIONS must be greater than zero".to_string(),
            ));
        }
        if self
            .connect_retry_max_interval_ms
            .is_some_and(|max| max < self.connect_retry_interval_ms)
        {
            return Err(ConfigError::Invalid(
                "CONNECT_RETRY_MAX_INTERVAL_MS must not be below CONNECT_RETRY_INTERVAL_MS"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// 启动时连接存储所用的重试策略
    pub fn connect_retry_policy(&self) -> RetryPolicy {
        let interval = Duration::from_millis(self.connect_retry_interval_ms);
        let max_interval = Duration::from_millis(
            self.connect_retry_max_interval_ms.unwrap_or(self.connect_retry_interval_ms),
        );
        RetryPolicy::builder()
            .interval(interval)
            .max_interval(max_interval)
            .multiplier(if max_interval > interval { 2.0 } else { 1.0 })
            .maybe_max_attempts(self.connect_retry_max_attempts)
            .build()
    }
}
