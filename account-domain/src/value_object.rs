//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::DomainError;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// 账户标识
///
/// 由服务端在创建时分配，创建后不可变。新生成的标识为 ULID 文本：
/// 26 位 Crockford Base32，字典序与生成时间一致。
///
/// 查询时调用方可能传入任意字符串，因此解析永远成功，
/// 不存在的标识由仓储返回 `NotFound`。
///
/// # 示例
///
/// ```
/// use account_domain::value_object::AccountId;
///
/// let earlier = AccountId::from_ulid(ulid::Ulid::from_parts(1, 0));
/// let later = AccountId::from_ulid(ulid::Ulid::from_parts(2, 0));
/// assert!(earlier < later);
/// assert_eq!(earlier.as_str().len(), 26);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for AccountId {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.is_empty() {
            return Err(DomainError::invalid_argument("account id must not be empty"));
        }
        Ok(())
    }
}

impl FromStr for AccountId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for AccountId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 账户名称（调用方在创建时提供，创建后不可变）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// 创建并校验名称：不能为空或仅包含空白
    ///
    /// # 示例
    ///
    /// ```
    /// use account_domain::value_object::AccountName;
    ///
    /// assert!(AccountName::parse("alice").is_ok());
    /// assert!(AccountName::parse("   ").is_err());
    /// ```
    pub fn parse(value: impl Into<String>) -> Result<Self, DomainError> {
        let name = Self(value.into());
        name.validate()?;
        Ok(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl ValueObject for AccountName {
    type Error = DomainError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.trim().is_empty() {
            return Err(DomainError::invalid_argument("account name must not be empty"));
        }
        Ok(())
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
