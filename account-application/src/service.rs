use crate::error::{AppError, AppResult};
use crate::id_generator::{IdGenerator, UlidGenerator};
use crate::pagination::normalize_take;
use account_domain::entity::Entity;
use account_domain::persist::AccountRepository;
use account_domain::{Account, AccountId, AccountName, DomainError, RequestContext};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// 账户服务（Account Service）
///
/// - 创建账户时生成标识，名称由调用方提供；
/// - 查询为纯透传，服务不缓存任何账户；
/// - 仓储错误原样转发（包装在 `AppError::Domain` 中）。
#[async_trait]
pub trait AccountService: Send + Sync {
    /// 生成新标识并持久化账户，成功时返回构造出的账户
    async fn post_account(&self, ctx: &RequestContext, name: String) -> AppResult<Account>;

    async fn get_account(&self, ctx: &RequestContext, id: &AccountId) -> AppResult<Account>;

    /// 分页列出账户（按 ID 倒序），`take` 经 [`normalize_take`] 归一化
    async fn get_accounts(
        &self,
        ctx: &RequestContext,
        skip: u64,
        take: u64,
    ) -> AppResult<Vec<Account>>;

    /// 存储存活检查
    async fn health(&self, ctx: &RequestContext) -> AppResult<()>;
}

pub struct AccountServiceImpl<R, G = UlidGenerator> {
    repository: R,
    ids: G,
}

impl<R> AccountServiceImpl<R>
where
    R: AccountRepository,
{
    pub fn new(repository: R) -> Self {
        Self::with_id_generator(repository, UlidGenerator::new())
    }
}

impl<R, G> AccountServiceImpl<R, G>
where
    R: AccountRepository,
    G: IdGenerator,
{
    pub fn with_id_generator(repository: R, ids: G) -> Self {
        Self { repository, ids }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R, G> AccountService for AccountServiceImpl<R, G>
where
    R: AccountRepository,
    G: IdGenerator,
{
    #[instrument(skip(self, ctx, name), fields(correlation_id = ?ctx.correlation_id()))]
    async fn post_account(&self, ctx: &RequestContext, name: String) -> AppResult<Account> {
        let name = AccountName::parse(name).map_err(|e| match e {
            DomainError::InvalidArgument { reason } => AppError::Validation(reason),
            other => AppError::Domain(other),
        })?;
        let account = Account::create(self.ids.next_id(), name);

        self.repository.put_account(ctx, &account).await?;

        debug!(id = %account.id(), "account created");
        Ok(account)
    }

    #[instrument(skip(self, ctx), fields(correlation_id = ?ctx.correlation_id()))]
    async fn get_account(&self, ctx: &RequestContext, id: &AccountId) -> AppResult<Account> {
        Ok(self.repository.get_account_by_id(ctx, id).await?)
    }

    #[instrument(skip(self, ctx), fields(correlation_id = ?ctx.correlation_id()))]
    async fn get_accounts(
        &self,
        ctx: &RequestContext,
        skip: u64,
        take: u64,
    ) -> AppResult<Vec<Account>> {
        let take = normalize_take(skip, take);
        Ok(self.repository.list_accounts(ctx, skip, take).await?)
    }

    async fn health(&self, ctx: &RequestContext) -> AppResult<()> {
        Ok(self.repository.ping(ctx).await?)
    }
}
