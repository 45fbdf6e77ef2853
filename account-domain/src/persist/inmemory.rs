//! 内存版账户仓储（InMemoryAccountRepository）
//!
//! 基于 `BTreeMap` 的轻量实现，天然按 ID 有序，满足 `AccountRepository` 协议；
//! 典型用途：测试替身、示例与本地开发。
//!
use crate::account::Account;
use crate::context::RequestContext;
use crate::entity::Entity;
use crate::error::{DomainError, DomainResult as Result};
use crate::persist::AccountRepository;
use crate::value_object::AccountId;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<BTreeMap<AccountId, Account>>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前保存的账户数量
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_closed() {
            return Err(DomainError::io("repository is closed"));
        }
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn put_account(&self, ctx: &RequestContext, account: &Account) -> Result<()> {
        ctx.run(async {
            self.ensure_open()?;
            let mut accounts = self.accounts.write().await;
            match accounts.entry(account.id().clone()) {
                Entry::Occupied(_) => Err(DomainError::constraint_violation(format!(
                    "account {} already exists",
                    account.id()
                ))),
                Entry::Vacant(slot) => {
                    slot.insert(account.clone());
                    Ok(())
                }
            }
        })
        .await
    }

    async fn get_account_by_id(&self, ctx: &RequestContext, id: &AccountId) -> Result<Account> {
        ctx.run(async {
            self.ensure_open()?;
            self.accounts
                .read()
                .await
                .get(id)
                .cloned()
                .ok_or_else(|| DomainError::not_found(format!("account {id}")))
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
            self.ensure_open()?;
            let skip = usize::try_from(skip).unwrap_or(usize::MAX);
            let take = usize::try_from(take).unwrap_or(usize::MAX);
            Ok(self
                .accounts
                .read()
                .await
                .values()
                .rev()
                .skip(skip)
                .take(take)
                .cloned()
                .collect())
        })
        .await
    }

    async fn ping(&self, ctx: &RequestContext) -> Result<()> {
        ctx.run(async { self.ensure_open() }).await
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str, name: &str) -> Account {
        Account::new(AccountId::from(id), name)
    }

    #[tokio::test]
    async fn put_then_get_roundtrip() {
        let repo = InMemoryAccountRepository::new();
        let ctx = RequestContext::background();
        repo.put_account(&ctx, &account("a", "alice")).await.unwrap();

        let got = repo
            .get_account_by_id(&ctx, &AccountId::from("a"))
            .await
            .unwrap();
        assert_eq!(got.name(), "alice");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_id_is_constraint_violation() {
        let repo = InMemoryAccountRepository::new();
        let ctx = RequestContext::background();
        repo.put_account(&ctx, &account("a", "alice")).await.unwrap();

        let err = repo
            .put_account(&ctx, &account("a", "mallory"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ConstraintViolation { .. }));

        // 原记录保持不变
        let got = repo
            .get_account_by_id(&ctx, &AccountId::from("a"))
            .await
            .unwrap();
        assert_eq!(got.name(), "alice");
    }

    #[tokio::test]
    async fn closed_repository_reports_io() {
        let repo = InMemoryAccountRepository::new();
        let ctx = RequestContext::background();
        repo.close().await;
        repo.close().await;
        assert!(repo.is_closed());

        let err = repo.ping(&ctx).await.unwrap_err();
        assert!(matches!(err, DomainError::Io { .. }));
    }

    #[tokio::test]
    async fn cancelled_context_is_reported_before_store_access() {
        let repo = InMemoryAccountRepository::new();
        let ctx = RequestContext::background();
        ctx.cancel();

        let err = repo
            .put_account(&ctx, &account("a", "alice"))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Canceled);
        assert!(repo.is_empty().await);
    }
}
