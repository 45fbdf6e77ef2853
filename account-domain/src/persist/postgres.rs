//! Postgres 账户仓储
//!
//! 表结构要求（见 `account-server/db/up.sql`）：
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS accounts (
//!     id   TEXT PRIMARY KEY,
//!     name TEXT NOT NULL
//! );
//! ```
//!
//! 连接池由 sqlx 负责并发安全与复用，本仓储不再额外加锁，
//! 也不使用多语句事务。
//!
use crate::account::Account;
use crate::context::RequestContext;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult as Result};
use crate::persist::AccountRepository;
use crate::value_object::AccountId;
use async_trait::async_trait;
use bon::Builder;
use futures_util::{Stream, TryStreamExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{Connection, PgPool, Row};
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// 连接池参数
#[derive(Builder, Debug, Clone)]
pub struct PostgresSettings {
    #[builder(default = 10)]
    max_connections: u32,
    #[builder(default = Duration::from_secs(5))]
    acquire_timeout: Duration,
}

impl Default for PostgresSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    /// 解析连接串、建立连接池并 ping 一次；连接串非法时返回 `InvalidArgument`，
    /// 存储不可达时返回 `Io`。
    pub async fn connect(url: &str, settings: &PostgresSettings) -> Result<Self> {
        let options = PgConnectOptions::from_str(url)
            .map_err(|e| DomainError::invalid_argument(format!("malformed database url: {e}")))?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await?;

        let repository = Self { pool };
        repository.ping(&RequestContext::background()).await?;
        Ok(repository)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn decode_account(row: &PgRow) -> std::result::Result<Account, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let name: String = row.try_get("name")?;
    Ok(Account::new(AccountId::from(id), name))
}

/// 逐行消费游标：游标错误终止整个列表，单行解码失败只记录并跳过该行
async fn collect_decoded<S, R, D, E>(mut rows: S, decode: D) -> Result<Vec<Account>>
where
    S: Stream<Item = std::result::Result<R, sqlx::Error>> + Unpin,
    D: Fn(&R) -> std::result::Result<Account, E>,
    E: Display,
{
    let mut accounts = Vec::new();
    while let Some(row) = rows.try_next().await? {
        match decode(&row) {
            Ok(account) => accounts.push(account),
            Err(err) => {
                tracing::warn!(error = %err, "skipping undecodable account row");
            }
        }
    }
    Ok(accounts)
}

// 上层保证 take <= 100；单独使用仓储时超大值按 i64::MAX 处理
fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn put_account(&self, ctx: &RequestContext, account: &Account) -> Result<()> {
        ctx.run(async {
            sqlx::query("INSERT INTO accounts(id, name) VALUES($1, $2)")
                .bind(account.id().as_str())
                .bind(account.name())
                .execute(&self.pool)
                .await?;
            Ok::<_, DomainError>(())
        })
        .await
    }

    async fn get_account_by_id(&self, ctx: &RequestContext, id: &AccountId) -> Result<Account> {
        ctx.run(async {
            let row = sqlx::query("SELECT id, name FROM accounts WHERE id = $1")
                .bind(id.as_str())
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| DomainError::not_found(format!("account {id}")))?;
            decode_account(&row).map_err(DomainError::from)
        })
        .await
    }

    async fn list_accounts(
        &self,
        ctx: &RequestContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Account>> {
        ctx.run(async {
            let rows =
                sqlx::query("SELECT id, name FROM accounts ORDER BY id DESC OFFSET $1 LIMIT $2")
                    .bind(to_sql_bound(skip))
                    .bind(to_sql_bound(take))
                    .fetch(&self.pool);
            collect_decoded(rows, decode_account).await
        })
        .await
    }

    async fn ping(&self, ctx: &RequestContext) -> Result<()> {
        ctx.run(async {
            let mut conn = self.pool.acquire().await?;
            conn.ping().await?;
            Ok::<_, DomainError>(())
        })
        .await
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
