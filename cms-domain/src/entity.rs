//! 实体（Entity）基础抽象
//!
//! 为聚合与实体提供统一的标识（Id）与版本（optimistic locking）能力。
//!
use crate::error::{DomainError, DomainResult};
use std::{fmt::Display, str::FromStr};

/// 具备唯一标识与版本的实体抽象
pub trait Entity: Send + Sync {
    /// 实体标识类型，要求可解析、可显示与可克隆
    type Id: FromStr + Clone + Display + Send + Sync;

    /// 使用给定标识与版本创建实体
    fn new(aggregate_id: Self::Id, version: usize) -> Self;

    /// 获取实体标识
    fn id(&self) -> &Self::Id;

    /// 获取当前版本（每次持久化的状态变更 +1，用于乐观锁）
    fn version(&self) -> usize;
}

/// 校验必填文本字段（去除首尾空白后不能为空）
pub(crate) fn ensure_not_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::invalid_value(format!("{field} must not be blank")));
    }
    Ok(())
}
