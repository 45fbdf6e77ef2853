//! 领域层统一错误定义
//!
//! 覆盖账户仓储与调用上下文可能产生的全部失败种类，
//! 各实现层（内存、Postgres）统一转换为 `DomainError` 后原样上抛。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // --- 仓储/持久化 ---
    #[error("not found: {reason}")]
    NotFound { reason: String },
    #[error("constraint violation: {reason}")]
    ConstraintViolation { reason: String },
    #[error("io error: {reason}")]
    Io { reason: String },

    // --- 调用上下文 ---
    #[error("operation canceled")]
    Canceled,
    #[error("deadline exceeded")]
    DeadlineExceeded,

    // --- 输入校验 ---
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl DomainError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn constraint_violation(reason: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            reason: reason.into(),
        }
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io {
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// 是否为重试也无法恢复的错误（配置或输入本身有误）
    pub fn is_permanent(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

// ---- Cross-crate conversions for infrastructure convenience ----
// 允许在基础设施层直接使用 `?` 将 sqlx 错误转换为 DomainError

#[cfg(feature = "infra-sqlx")]
impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DomainError::not_found("row not found"),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::constraint_violation(db.message().to_string())
            }
            sqlx::Error::Configuration(source) => DomainError::invalid_argument(source.to_string()),
            other => DomainError::io(other.to_string()),
        }
    }
}
