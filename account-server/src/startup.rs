//! 启动流程：带重试地建立存储连接
use account_domain::DomainError;
use account_domain::persist::{PostgresAccountRepository, PostgresSettings};
use tracing::info;

use crate::config::ServiceConfig;
use crate::retry::RetryError;

/// 按配置的重试策略连接 Postgres；连接串非法属于永久错误，不再重试
pub async fn connect_repository(
    config: &ServiceConfig,
) -> Result<PostgresAccountRepository, RetryError<DomainError>> {
    let settings = PostgresSettings::builder()
        .max_connections(config.db_max_connections)
        .build();

    let repository = config
        .connect_retry_policy()
        .run(
            |attempt| {
                info!(attempt, "connecting to account store");
                PostgresAccountRepository::connect(&config.database_url, &settings)
            },
            DomainError::is_permanent,
        )
        .await?;

    info!("account store connection established");
    Ok(repository)
}
