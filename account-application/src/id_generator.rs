//! 账户标识生成
//!
//! 默认实现基于 ULID：48 位毫秒时间戳 + 80 位随机数，文本形式按字典序与时间一致，
//! 跨进程并发生成时碰撞概率可忽略。同一进程内由 `ulid::Generator` 保证严格递增。
//!
use account_domain::AccountId;
use std::sync::{Mutex, PoisonError};
use ulid::{Generator, Ulid};

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> AccountId;
}

pub struct UlidGenerator {
    inner: Mutex<Generator>,
}

impl UlidGenerator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Generator::new()),
        }
    }
}

impl Default for UlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UlidGenerator {
    fn next_id(&self) -> AccountId {
        let mut generator = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // 同一毫秒内随机部分溢出时退化为普通 ULID（仍然唯一，只是不保证单调）
        let ulid = generator.generate().unwrap_or_else(|_| Ulid::new());
        AccountId::from_ulid(ulid)
    }
}
