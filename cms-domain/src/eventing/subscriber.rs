//! 事件订阅者（EventSubscriber）
//!
//! 对一类或多类事件做出反应的处理逻辑，每个订阅者独立注册、独立失败。
//!
use crate::domain_event::{DomainEvent, EventName};
use crate::error::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// 订阅者名称（用于日志与错误定位）
    fn subscriber_name(&self) -> &str;

    /// 订阅的事件种类
    fn subscribed_to(&self) -> Vec<EventName>;

    /// 处理事件；返回错误时由总线按分发策略决定是否继续
    async fn on(&self, event: &DomainEvent) -> DomainResult<()>;
}
