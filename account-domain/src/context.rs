//! 调用上下文（RequestContext）
//!
//! 承载一次调用的横切信息并一路传递到仓储：
//! - 取消令牌（`CancellationToken`）：调用方放弃时触发；
//! - 截止时间（`deadline`）：超时后存储操作立即中止；
//! - 关联 ID（`correlation_id`）：用于日志串联。
//!
//! 仓储实现通过 [`RequestContext::run`] 包裹每一次存储调用，
//! 取消与超时分别表现为 `DomainError::Canceled` 与 `DomainError::DeadlineExceeded`，
//! 而不是笼统的 I/O 错误。
//!
use std::future::Future;
use std::time::Duration;

use bon::Builder;
use tokio::time::{self, Instant};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{DomainError, DomainResult};

/// 典型用法：
/// ```rust
/// use std::time::Duration;
/// use account_domain::context::RequestContext;
///
/// let ctx = RequestContext::builder()
///     .correlation_id("req-42".to_string())
///     .build()
///     .with_timeout(Duration::from_secs(5));
/// assert_eq!(ctx.correlation_id(), Some("req-42"));
/// assert!(ctx.deadline().is_some());
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct RequestContext {
    /// 取消令牌；克隆出的上下文共享同一令牌
    #[builder(default)]
    cancellation: CancellationToken,
    /// 截止时间
    deadline: Option<Instant>,
    /// 关联 ID
    correlation_id: Option<String>,
}

impl RequestContext {
    /// 无截止时间、不会被取消的根上下文（启动流程与测试使用）
    pub fn background() -> Self {
        Self::default()
    }

    /// 设置相对超时；若已有更早的截止时间则保留更早者
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < candidate => existing,
            _ => candidate,
        });
        self
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// 返回一个守卫，守卫被丢弃时取消本上下文
    pub fn cancel_on_drop(&self) -> DropGuard {
        self.cancellation.clone().drop_guard()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    /// 检查上下文是否仍然有效
    pub fn check(&self) -> DomainResult<()> {
        if self.cancellation.is_cancelled() {
            return Err(DomainError::Canceled);
        }
        if matches!(self.deadline, Some(d) if d <= Instant::now()) {
            return Err(DomainError::DeadlineExceeded);
        }
        Ok(())
    }

    /// 在上下文约束下执行一次存储操作
    ///
    /// 取消或超时先于 `fut` 完成时，`fut` 被丢弃（进行中的存储调用随之中止）。
    pub async fn run<F, T>(&self, fut: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        self.check()?;

        let expired = async {
            match self.deadline {
                Some(deadline) => time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(DomainError::Canceled),
            _ = expired => Err(DomainError::DeadlineExceeded),
            out = fut => out,
        }
    }
}
