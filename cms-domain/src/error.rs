//! 领域层统一错误定义
//!
//! 覆盖事件分发、批量补偿、仓储、状态校验等最小必要集合，
//! 便于应用层统一转换为 `AppError`。
//!
use crate::domain_event::EventName;
use std::fmt;
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 解析 ---
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 事件系统 ---
    #[error("event subscriber failed: subscriber={subscriber}, event={event}: {source}")]
    EventSubscriber {
        subscriber: String,
        event: EventName,
        #[source]
        source: Box<DomainError>,
    },
    #[error("event dispatch failed: {} subscriber failure(s): {}", .failures.len(), joined(.failures))]
    DispatchFailed { failures: Vec<DomainError> },
    #[error(
        "batch partially failed: succeeded={succeeded}, failed={}: {}",
        .failures.len(),
        joined(.failures)
    )]
    BatchPartiallyFailed {
        succeeded: usize,
        failures: Vec<BatchFailure>,
    },

    // --- 仓储/持久化 ---
    #[error("repository error: {reason}")]
    Repository { reason: String },
    #[error("version conflict: expected={expected}, actual={actual}")]
    VersionConflict { expected: usize, actual: usize },

    // --- 领域规则/状态 ---
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },
    #[error("not found: {reason}")]
    NotFound { reason: String },
}

/// 批量补偿中单个条目的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub item_id: String,
    pub reason: String,
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.item_id, self.reason)
    }
}

fn joined<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl DomainError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    pub fn repository(reason: impl Into<String>) -> Self {
        Self::Repository {
            reason: reason.into(),
        }
    }

    /// 是否为订阅者/补偿环节的失败（主操作已提交，但后续一致性修复未完成）
    pub fn is_dispatch_failure(&self) -> bool {
        matches!(
            self,
            Self::EventSubscriber { .. } | Self::DispatchFailed { .. } | Self::BatchPartiallyFailed { .. }
        )
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
