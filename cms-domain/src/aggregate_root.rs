//! 聚合根（AggregateRoot）
//!
//! 聚合根在一次用例执行中累积未提交的领域事件，用例在持久化成功后
//! 通过 `pull_events` 取出并交给事件总线发布：
//! - `record`：追加事件，不会失败；
//! - `pull_events`：取出全部待发布事件并清空，连续调用第二次得到空列表；
//! - 仓储只保存聚合状态，不保存待发布事件（`#[serde(skip)]`）。
//!
use crate::domain_event::{BusinessContext, DomainEvent, EventPayload};
use crate::entity::Entity;

/// 聚合持有的待发布事件列表（按记录顺序）
#[derive(Debug, Clone, Default)]
pub struct UncommittedEvents {
    events: Vec<DomainEvent>,
}

impl UncommittedEvents {
    pub fn push(&mut self, event: DomainEvent) {
        self.events.push(event);
    }

    /// 取出全部事件并清空
    pub fn take(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn as_slice(&self) -> &[DomainEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// 聚合根接口：实体 + 领域事件记录能力
///
/// 通常由 `#[entity(id = ..., aggregate_root = "...")]` 宏生成实现。
pub trait AggregateRoot: Entity {
    /// 聚合类型名（写入事件的 `aggregate_type`）
    const TYPE: &'static str;

    fn uncommitted_events(&self) -> &UncommittedEvents;

    fn uncommitted_events_mut(&mut self) -> &mut UncommittedEvents;

    /// 记录一个已发生的领域事件
    fn record(&mut self, event: DomainEvent) {
        self.uncommitted_events_mut().push(event);
    }

    /// 以当前聚合为来源构造事件并记录
    fn raise(&mut self, payload: EventPayload, context: BusinessContext) {
        let event = DomainEvent::builder()
            .aggregate_id(self.id().to_string())
            .aggregate_type(Self::TYPE.to_string())
            .context(context)
            .payload(payload)
            .build();
        self.record(event);
    }

    /// 取出全部待发布事件并清空
    fn pull_events(&mut self) -> Vec<DomainEvent> {
        self.uncommitted_events_mut().take()
    }

    fn has_pending_events(&self) -> bool {
        !self.uncommitted_events().is_empty()
    }
}
