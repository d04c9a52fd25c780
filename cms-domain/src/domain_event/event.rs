use super::{BusinessContext, EventName, EventPayload};
use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 领域事件：某个聚合上已经发生的事实，构造后不可变
///
/// 仅在进程内分发，分发后即丢弃，不做持久化。
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct DomainEvent {
    /// 每次发生唯一
    #[builder(default = Uuid::new_v4())]
    event_id: Uuid,
    /// 产生该事件的聚合标识
    aggregate_id: String,
    /// 产生该事件的聚合类型
    aggregate_type: String,
    #[builder(default = Utc::now())]
    occurred_on: DateTime<Utc>,
    #[builder(default)]
    context: BusinessContext,
    payload: EventPayload,
}

impl DomainEvent {
    pub fn name(&self) -> EventName {
        self.payload.name()
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn aggregate_id(&self) -> &str {
        &self.aggregate_id
    }

    pub fn aggregate_type(&self) -> &str {
        &self.aggregate_type
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        self.occurred_on
    }

    pub fn context(&self) -> &BusinessContext {
        &self.context
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }
}
