//! 账户实体
//!
//! 系统中唯一的实体。`id` 由服务层生成，`name` 由调用方提供，
//! 两者在创建后都不再变化（实体层面只追加、不修改）。
//!
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::value_object::{AccountId, AccountName};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: AccountId,
    name: String,
}

impl Account {
    pub fn new(id: AccountId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// 由已校验的名称构造
    pub fn create(id: AccountId, name: AccountName) -> Self {
        Self::new(id, name.into_inner())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_parts(self) -> (AccountId, String) {
        (self.id, self.name)
    }
}

impl Entity for Account {
    type Id = AccountId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
