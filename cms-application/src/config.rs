//! 运行配置
//!
//! 从环境变量读取：
//! - `CMS_DISPATCH_POLICY`：`fail_fast`（默认）| `continue_on_error`
//! - `RUST_LOG`：日志过滤表达式（默认 `info`），由二进制入口交给 tracing-subscriber
//!
use crate::error::AppError;
use cms_domain::eventing::{DispatchPolicy, EventBusConfig};
use serde::{Deserialize, Serialize};

pub const DISPATCH_POLICY_ENV: &str = "CMS_DISPATCH_POLICY";
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsConfig {
    pub dispatch_policy: DispatchPolicy,
    pub log_filter: String,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            dispatch_policy: DispatchPolicy::default(),
            log_filter: "info".to_string(),
        }
    }
}

impl CmsConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意键值来源构造（未设置的键使用默认值）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(DISPATCH_POLICY_ENV) {
            config.dispatch_policy = raw
                .parse()
                .map_err(|err| AppError::Validation(format!("{DISPATCH_POLICY_ENV}: {err}")))?;
        }

        if let Some(raw) = lookup(LOG_FILTER_ENV) {
            if raw.trim().is_empty() {
                return Err(AppError::Validation(format!(
                    "{LOG_FILTER_ENV} must not be blank"
                )));
            }
            config.log_filter = raw;
        }

        Ok(config)
    }

    pub fn event_bus(&self) -> EventBusConfig {
        EventBusConfig {
            dispatch_policy: self.dispatch_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = CmsConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, CmsConfig::default());
        assert_eq!(config.dispatch_policy, DispatchPolicy::FailFast);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn reads_policy_and_filter() {
        let config = CmsConfig::from_lookup(lookup(&[
            (DISPATCH_POLICY_ENV, "continue_on_error"),
            (LOG_FILTER_ENV, "cms_application=debug"),
        ]))
        .unwrap();
        assert_eq!(config.dispatch_policy, DispatchPolicy::ContinueOnError);
        assert_eq!(config.log_filter, "cms_application=debug");
        assert_eq!(
            config.event_bus().dispatch_policy,
            DispatchPolicy::ContinueOnError
        );
    }

    #[test]
    fn invalid_policy_is_a_validation_error() {
        let err = CmsConfig::from_lookup(lookup(&[(DISPATCH_POLICY_ENV, "retry")])).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains(DISPATCH_POLICY_ENV)),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn blank_log_filter_is_rejected() {
        let err = CmsConfig::from_lookup(lookup(&[(LOG_FILTER_ENV, " ")])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
