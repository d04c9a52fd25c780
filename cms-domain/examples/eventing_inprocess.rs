/// 进程内事件总线示例
/// 聚合记录事件 -> 用例取出事件 -> 总线按注册顺序同步分发给订阅者
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use cms_domain::aggregate_root::AggregateRoot;
use cms_domain::book::{Book, BookId};
use cms_domain::domain_event::{BusinessContext, DomainEvent, EventName};
use cms_domain::error::DomainResult;
use cms_domain::eventing::{EventSubscriber, InProcessEventBus};
use std::sync::Arc;

struct AuditLog;

#[async_trait]
impl EventSubscriber for AuditLog {
    fn subscriber_name(&self) -> &str {
        "audit_log"
    }

    fn subscribed_to(&self) -> Vec<EventName> {
        EventName::ALL.to_vec()
    }

    async fn on(&self, event: &DomainEvent) -> DomainResult<()> {
        println!(
            "[audit] {} {} aggregate={} actor={:?}",
            event.occurred_on().to_rfc3339(),
            event.name(),
            event.aggregate_id(),
            event.context().actor_id()
        );
        Ok(())
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    let mut bus = InProcessEventBus::default();
    bus.subscribe(Arc::new(AuditLog));
    let bus = bus.into_shared();

    let ctx = BusinessContext::builder()
        .actor_type("user".to_string())
        .actor_id("u-1".to_string())
        .build();

    let mut book = Book::create(BookId::new("b-1"), "Zero To Production", "L. Palmieri", ctx.clone())?;
    book.delete(ctx);

    let events = book.pull_events();
    bus.publish_all(&events).await?;
    println!("published {} event(s), pending={}", events.len(), book.has_pending_events());
    Ok(())
}
