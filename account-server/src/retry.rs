//! 启动期重试策略
//!
//! 只在进程初始化阶段使用一次（建立存储连接），不进入稳态请求路径。
//! 默认配置等价于“每 2 秒重试一次，永不放弃”。
//!
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use bon::Builder;
use tracing::warn;

#[derive(Builder, Debug, Clone)]
pub struct RetryPolicy {
    /// 首次失败后的等待时间
    interval: Duration,
    /// 等待时间上限
    #[builder(default = Duration::from_secs(30))]
    max_interval: Duration,
    /// 每次失败后等待时间的放大倍数（小于 1 按 1 处理）
    #[builder(default = 1.0)]
    multiplier: f64,
    /// 最大尝试次数；为空表示无限
    max_attempts: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum RetryError<E> {
    #[error("permanent failure: {0}")]
    Permanent(E),
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: E },
}

impl RetryPolicy {
    /// 固定间隔、无限重试
    pub fn forever(interval: Duration) -> Self {
        Self::builder()
            .interval(interval)
            .max_interval(interval)
            .build()
    }

    pub fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    /// 第 `failures` 次失败（从 0 计）之后的等待时间
    pub fn delay_for(&self, failures: u32) -> Duration {
        let factor = self.multiplier.max(1.0).powi(i32::try_from(failures).unwrap_or(i32::MAX));
        Duration::try_from_secs_f64(self.interval.as_secs_f64() * factor)
            .unwrap_or(self.max_interval)
            .min(self.max_interval.max(self.interval))
    }

    /// 反复执行 `op` 直到成功、遇到永久错误或次数耗尽
    ///
    /// `op` 收到从 1 开始的尝试序号。
    pub async fn run<T, E, F, Fut, P>(&self, mut op: F, is_permanent: P) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt = attempt.saturating_add(1);
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if is_permanent(&err) => return Err(RetryError::Permanent(err)),
                Err(err) => {
                    if self.max_attempts.is_some_and(|max| attempt >= max) {
                        return Err(RetryError::Exhausted {
                            attempts: attempt,
                            last: err,
                        });
                    }
                    let delay = self.delay_for(attempt - 1);
                    warn!(
                        attempt,
                        error = %err,
                        delay_ms = delay.as_millis() as u64,
                        "attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
