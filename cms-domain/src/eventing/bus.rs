//! 事件总线（EventBus）协议
//!
//! 用例通过构造函数注入 `Arc<dyn EventBus>`，在持久化成功后发布聚合取出的事件。
//! 发布是进程内、同步（在调用方任务中 await 完成）的分发，不是队列。
//!
use crate::{domain_event::DomainEvent, error::DomainResult as Result};
use async_trait::async_trait;

#[async_trait]
pub trait EventBus: Send + Sync {
    /// 发布单个事件，返回前所有匹配的订阅者均已执行完毕（或失败）
    async fn publish(&self, event: &DomainEvent) -> Result<()>;

    /// 按给定顺序发布一批事件，遇到第一个错误即返回
    async fn publish_all(&self, events: &[DomainEvent]) -> Result<()> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
