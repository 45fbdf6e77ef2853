//! 账户应用层（account-application）
//!
//! 承载业务规则：标识生成、分页归一化与名称校验，持久化委托给
//! `account_domain::persist::AccountRepository`。服务本身无状态，可在并发调用间共享。
//!
pub mod error;
pub mod id_generator;
pub mod pagination;
pub mod service;

pub use error::{AppError, AppResult, ErrorKind};
pub use id_generator::{IdGenerator, UlidGenerator};
pub use service::{AccountService, AccountServiceImpl};
