//! 日志初始化
use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// 安装全局 fmt 订阅者；`RUST_LOG` 优先于配置中的默认级别
pub fn init(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}
