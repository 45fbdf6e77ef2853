//! 账户仓储协议
//!
use crate::{
    account::Account, context::RequestContext, error::DomainResult as Result,
    value_object::AccountId,
};
use async_trait::async_trait;
use std::sync::Arc;

/// 账户仓储
///
/// 仓储独占账户的持久化表示；实现不解释、不重试存储错误，
/// 只把它们归类为 `DomainError` 后上抛。所有存储调用都必须遵守 `ctx`
/// 的取消与截止时间。
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// 插入新账户（仅插入，不做 upsert）；ID 已存在时返回 `ConstraintViolation`
    async fn put_account(&self, ctx: &RequestContext, account: &Account) -> Result<()>;

    /// 按 ID 查询；不存在时返回 `NotFound`
    async fn get_account_by_id(&self, ctx: &RequestContext, id: &AccountId) -> Result<Account>;

    /// 按 ID 倒序跳过 `skip` 条后返回至多 `take` 条；无匹配时返回空列表
    async fn list_accounts(
        &self,
        ctx: &RequestContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Account>>;

    /// 存活检查（一次往返）
    async fn ping(&self, ctx: &RequestContext) -> Result<()>;

    /// 释放底层资源；可重复调用
    async fn close(&self);
}

#[async_trait]
impl<T> AccountRepository for Arc<T>
where
    T: AccountRepository + ?Sized,
{
    async fn put_account(&self, ctx: &RequestContext, account: &Account) -> Result<()> {
        (**self).put_account(ctx, account).await
    }

    async fn get_account_by_id(&self, ctx: &RequestContext, id: &AccountId) -> Result<Account> {
        (**self).get_account_by_id(ctx, id).await
    }

    async fn list_accounts(
        &self,
        ctx: &RequestContext,
        skip: u64,
        take: u64,
    ) -> Result<Vec<Account>> {
        (**self).list_accounts(ctx, skip, take).await
    }

    async fn ping(&self, ctx: &RequestContext) -> Result<()> {
        (**self).ping(ctx).await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
