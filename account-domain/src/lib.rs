//! 账户领域层（account-domain）
//!
//! 提供账户服务的领域构件：
//! - 账户实体（`account`）与值对象（`value_object`）；
//! - 调用上下文（`context`）：取消与截止时间沿调用链传递到存储；
//! - 账户仓储协议及内存/Postgres 实现（`persist`）；
//! - 统一错误类型（`error`）。
//!
//! 本 crate 与传输层解耦，Postgres 实现通过 `infra-sqlx` 特性按需启用。
//!
pub mod account;
pub mod context;
pub mod entity;
pub mod error;
pub mod persist;
pub mod value_object;

pub use account::Account;
pub use context::RequestContext;
pub use error::{DomainError, DomainResult};
pub use value_object::{AccountId, AccountName};
