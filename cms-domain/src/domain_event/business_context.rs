use bon::Builder;
use serde::{Deserialize, Serialize};

use super::DomainEvent;

/// 业务上下文：随命令进入领域层，并被写入其产生的每一个事件
#[derive(Builder, Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessContext {
    /// 关联ID（同一次外部请求共享）
    correlation_id: Option<String>,
    /// 因果ID（触发本次操作的事件或请求）
    causation_id: Option<String>,
    /// 触发事件的主体类型（如 user、system）
    actor_type: Option<String>,
    /// 触发事件的主体ID（来自认证上下文）
    actor_id: Option<String>,
}

impl BusinessContext {
    /// 系统内部（订阅者补偿）发起的操作
    pub fn system() -> Self {
        Self::builder().actor_type("system".to_string()).build()
    }

    /// 由某个事件引发的后续操作：沿用关联ID，因果ID 指向该事件
    pub fn caused_by(event: &DomainEvent) -> Self {
        Self {
            correlation_id: event.context().correlation_id.clone(),
            causation_id: Some(event.event_id().to_string()),
            actor_type: Some("system".to_string()),
            actor_id: None,
        }
    }

    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }

    pub fn causation_id(&self) -> Option<&str> {
        self.causation_id.as_deref()
    }

    pub fn actor_type(&self) -> Option<&str> {
        self.actor_type.as_deref()
    }

    pub fn actor_id(&self) -> Option<&str> {
        self.actor_id.as_deref()
    }
}
