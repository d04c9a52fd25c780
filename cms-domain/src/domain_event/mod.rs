//! 领域事件（Domain Event）
//!
//! - `EventName`：封闭的事件种类枚举，作为事件总线的路由键；
//! - `EventPayload`：与事件种类一一对应的载荷；
//! - `DomainEvent`：不可变的事件记录（事件ID、聚合、发生时间、业务上下文、载荷）；
//! - `BusinessContext`：关联/因果/操作主体等横切信息。

mod business_context;
mod event;
mod event_name;
mod event_payload;

pub use business_context::BusinessContext;
pub use event::DomainEvent;
pub use event_name::EventName;
pub use event_payload::EventPayload;
