//! 持久化（persist）
//!
//! 定义账户仓储协议及其实现：
//! - 仓储协议（`AccountRepository`）：插入、按 ID 查询、按 ID 倒序分页列出；
//! - 内存实现（`InMemoryAccountRepository`）：测试与本地开发；
//! - Postgres 实现（`PostgresAccountRepository`，需启用 `infra-sqlx` 特性）。
//!
//! 服务层只依赖协议，不感知具体后端。
//!
mod account_repository;
mod inmemory;
#[cfg(feature = "infra-sqlx")]
mod postgres;

pub use account_repository::AccountRepository;
pub use inmemory::InMemoryAccountRepository;
#[cfg(feature = "infra-sqlx")]
pub use postgres::{PostgresAccountRepository, PostgresSettings};
