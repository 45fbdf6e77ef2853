//! 实体（Entity）基础抽象
//!
//! 为实体提供统一的标识能力。账户实体创建后不可变，因此不携带版本号。
//!
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display + Ord + Send + Sync;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;
}
