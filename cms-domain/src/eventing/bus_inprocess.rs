//! 进程内事件总线（InProcessEventBus）
//!
//! - 注册表：事件种类 → 按注册顺序排列的订阅者列表；同一订阅者实例（按指针身份）
//!   对同一事件种类只登记一次；
//! - `subscribe` 需要 `&mut self`，总线一旦以 `Arc<dyn EventBus>` 共享便无法再注册，
//!   分发期间注册表只读、无需加锁；
//! - `publish` 在调用方任务中依次 await 每个订阅者，不排队、不重试、不持久化；
//! - 失败策略见 `DispatchPolicy`。
//!
use super::{EventBus, EventSubscriber};
use crate::domain_event::{DomainEvent, EventName};
use crate::error::{DomainError, DomainResult as Result};
use async_trait::async_trait;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

// 导入由 bon::Builder 生成的 typestate 模块与状态转换别名
use self::in_process_event_bus_builder::{IsUnset, SetRegistry, State as BuilderState};

/// 订阅者失败时的分发策略
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// 第一个失败的订阅者错误直接返回，同一事件排在其后的订阅者不再执行
    #[default]
    FailFast,
    /// 所有订阅者都执行，失败汇总为 `DomainError::DispatchFailed` 返回
    ContinueOnError,
}

impl FromStr for DispatchPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "fail_fast" => Ok(Self::FailFast),
            "continue_on_error" => Ok(Self::ContinueOnError),
            other => Err(DomainError::Parse {
                reason: format!(
                    "unknown dispatch policy: {other} (expected fail_fast | continue_on_error)"
                ),
            }),
        }
    }
}

/// 事件总线配置
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventBusConfig {
    pub dispatch_policy: DispatchPolicy,
}

/// 进程内同步分发的事件总线
#[derive(Builder)]
pub struct InProcessEventBus {
    #[builder(default, setters(vis = "pub(crate)"))]
    registry: SubscriberRegistry,
    #[builder(default)]
    config: EventBusConfig,
}

impl<S: BuilderState> InProcessEventBusBuilder<S> {
    /// 在构造时一次性注册订阅者（按给定顺序）
    pub fn subscribers(
        self,
        subscribers: Vec<Arc<dyn EventSubscriber>>,
    ) -> InProcessEventBusBuilder<SetRegistry<S>>
    where
        <S as BuilderState>::Registry: IsUnset,
    {
        let mut registry = SubscriberRegistry::default();
        for subscriber in subscribers {
            registry.register(subscriber);
        }
        self.registry(registry)
    }
}

impl Default for InProcessEventBus {
    fn default() -> Self {
        Self::new(EventBusConfig::default())
    }
}

impl InProcessEventBus {
    pub fn new(config: EventBusConfig) -> Self {
        Self {
            registry: SubscriberRegistry::default(),
            config,
        }
    }

    /// 按订阅者声明的每个事件种类登记；已登记过的同一实例不会重复登记。
    ///
    /// 返回是否有新的登记发生。
    pub fn subscribe(&mut self, subscriber: Arc<dyn EventSubscriber>) -> bool {
        let name = subscriber.subscriber_name().to_string();
        let added = self.registry.register(subscriber);
        if added {
            info!(subscriber = %name, "event subscriber registered");
        } else {
            debug!(subscriber = %name, "event subscriber already registered, skipped");
        }
        added
    }

    /// 某事件种类的订阅者名称（按分发顺序）
    pub fn subscriptions(&self, event: EventName) -> Vec<&str> {
        self.registry
            .matching(event)
            .iter()
            .map(|s| s.subscriber_name())
            .collect()
    }

    /// 已登记的不同订阅者实例数量
    pub fn subscriber_count(&self) -> usize {
        self.registry.distinct_count()
    }

    pub fn config(&self) -> EventBusConfig {
        self.config
    }

    /// 冻结注册表，得到可注入用例的共享总线
    pub fn into_shared(self) -> Arc<dyn EventBus> {
        Arc::new(self)
    }

    async fn dispatch(&self, event: &DomainEvent, failures: &mut Vec<DomainError>) -> Result<()> {
        let name = event.name();
        let subscribers = self.registry.matching(name);

        if subscribers.is_empty() {
            debug!(event_name = %name, event_id = %event.event_id(), "no subscriber for domain event");
            return Ok(());
        }

        debug!(
            event_name = %name,
            event_id = %event.event_id(),
            aggregate_id = event.aggregate_id(),
            subscribers = subscribers.len(),
            "dispatching domain event"
        );

        for subscriber in subscribers {
            let Err(source) = subscriber.on(event).await else {
                continue;
            };

            let err = DomainError::EventSubscriber {
                subscriber: subscriber.subscriber_name().to_string(),
                event: name,
                source: Box::new(source),
            };
            warn!(
                error = %err,
                event_id = %event.event_id(),
                policy = ?self.config.dispatch_policy,
                "event subscriber failed"
            );

            match self.config.dispatch_policy {
                DispatchPolicy::FailFast => return Err(err),
                DispatchPolicy::ContinueOnError => failures.push(err),
            }
        }

        Ok(())
    }
}

fn into_result(failures: Vec<DomainError>) -> Result<()> {
    if failures.is_empty() {
        Ok(())
    } else {
        Err(DomainError::DispatchFailed { failures })
    }
}

#[async_trait]
impl EventBus for InProcessEventBus {
    async fn publish(&self, event: &DomainEvent) -> Result<()> {
        let mut failures = Vec::new();
        self.dispatch(event, &mut failures).await?;
        into_result(failures)
    }

    async fn publish_all(&self, events: &[DomainEvent]) -> Result<()> {
        let mut failures = Vec::new();
        for event in events {
            self.dispatch(event, &mut failures).await?;
        }
        into_result(failures)
    }
}

#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    by_name: HashMap<EventName, Vec<Arc<dyn EventSubscriber>>>,
}

impl SubscriberRegistry {
    fn register(&mut self, subscriber: Arc<dyn EventSubscriber>) -> bool {
        let mut added = false;
        for name in subscriber.subscribed_to() {
            let list = self.by_name.entry(name).or_default();
            if list.iter().any(|s| same_instance(s, &subscriber)) {
                continue;
            }
            list.push(subscriber.clone());
            added = true;
        }
        added
    }

    fn matching(&self, name: EventName) -> &[Arc<dyn EventSubscriber>] {
        self.by_name.get(&name).map(Vec::as_slice).unwrap_or_default()
    }

    // 按指针逐一比较，O(n²)；只在装配阶段调用，订阅者数量很小
    fn distinct_count(&self) -> usize {
        let mut seen: Vec<&Arc<dyn EventSubscriber>> = Vec::new();
        for s in self.by_name.values().flatten() {
            if !seen.iter().any(|known| same_instance(known, s)) {
                seen.push(s);
            }
        }
        seen.len()
    }
}

// 只比较数据指针，忽略 vtable
fn same_instance(a: &Arc<dyn EventSubscriber>, b: &Arc<dyn EventSubscriber>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::ArticleId;
    use crate::book::BookId;
    use crate::domain_event::EventPayload;
    use std::sync::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        events: Vec<EventName>,
        fail: bool,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, events: Vec<EventName>, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                name,
                events,
                fail: false,
                log: log.clone(),
            })
        }

        fn failing(name: &'static str, events: Vec<EventName>, log: &Log) -> Arc<Self> {
            Arc::new(Self {
                name,
                events,
                fail: true,
                log: log.clone(),
            })
        }
    }

    #[async_trait]
    impl EventSubscriber for Recorder {
        fn subscriber_name(&self) -> &str {
            self.name
        }

        fn subscribed_to(&self) -> Vec<EventName> {
            self.events.clone()
        }

        async fn on(&self, event: &DomainEvent) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.name, event.aggregate_id()));
            if self.fail {
                return Err(DomainError::repository("boom"));
            }
            Ok(())
        }
    }

    fn book_deleted(id: &str) -> DomainEvent {
        DomainEvent::builder()
            .aggregate_id(id.to_string())
            .aggregate_type("book".to_string())
            .payload(EventPayload::BookDeleted {
                book_id: BookId::new(id),
            })
            .build()
    }

    fn article_deleted(id: &str) -> DomainEvent {
        DomainEvent::builder()
            .aggregate_id(id.to_string())
            .aggregate_type("article".to_string())
            .payload(EventPayload::ArticleDeleted {
                article_id: ArticleId::new(id),
            })
            .build()
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn subscribers_run_in_registration_order() {
        let log = Log::default();
        let mut bus = InProcessEventBus::default();
        bus.subscribe(Recorder::new("s1", vec![EventName::BookDeleted], &log));
        bus.subscribe(Recorder::new("s2", vec![EventName::BookDeleted], &log));

        bus.publish(&book_deleted("b-1")).await.unwrap();

        assert_eq!(entries(&log), vec!["s1:b-1", "s2:b-1"]);
        assert_eq!(bus.subscriptions(EventName::BookDeleted), vec!["s1", "s2"]);
    }

    #[tokio::test]
    async fn same_instance_registered_twice_runs_once() {
        let log = Log::default();
        let mut bus = InProcessEventBus::default();
        let s1 = Recorder::new("s1", vec![EventName::BookDeleted], &log);

        assert!(bus.subscribe(s1.clone()));
        assert!(!bus.subscribe(s1));
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(&book_deleted("b-1")).await.unwrap();
        assert_eq!(entries(&log), vec!["s1:b-1"]);
    }

    #[tokio::test]
    async fn distinct_instances_of_same_type_both_run() {
        let log = Log::default();
        let mut bus = InProcessEventBus::default();
        assert!(bus.subscribe(Recorder::new("twin", vec![EventName::BookDeleted], &log)));
        assert!(bus.subscribe(Recorder::new("twin", vec![EventName::BookDeleted], &log)));

        bus.publish(&book_deleted("b-1")).await.unwrap();
        assert_eq!(entries(&log).len(), 2);
        assert_eq!(bus.subscriber_count(), 2);
    }

    #[tokio::test]
    async fn duplicated_declared_names_register_once() {
        let log = Log::default();
        let mut bus = InProcessEventBus::default();
        bus.subscribe(Recorder::new(
            "s1",
            vec![EventName::BookDeleted, EventName::BookDeleted],
            &log,
        ));

        bus.publish(&book_deleted("b-1")).await.unwrap();
        assert_eq!(entries(&log), vec!["s1:b-1"]);
    }

    #[tokio::test]
    async fn routes_only_to_matching_event_names() {
        let log = Log::default();
        let mut bus = InProcessEventBus::default();
        bus.subscribe(Recorder::new("books", vec![EventName::BookDeleted], &log));
        bus.subscribe(Recorder::new("articles", vec![EventName::ArticleDeleted], &log));
        bus.subscribe(Recorder::new(
            "both",
            vec![EventName::ArticleDeleted, EventName::BookDeleted],
            &log,
        ));

        bus.publish(&article_deleted("a-1")).await.unwrap();
        assert_eq!(entries(&log), vec!["articles:a-1", "both:a-1"]);
    }

    #[tokio::test]
    async fn event_without_subscribers_is_a_noop() {
        let bus = InProcessEventBus::default();
        bus.publish(&book_deleted("b-1")).await.unwrap();
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn fail_fast_propagates_and_skips_later_subscribers() {
        let log = Log::default();
        let mut bus = InProcessEventBus::default();
        bus.subscribe(Recorder::failing("s1", vec![EventName::BookDeleted], &log));
        bus.subscribe(Recorder::new("s2", vec![EventName::BookDeleted], &log));

        let err = bus.publish(&book_deleted("b-1")).await.unwrap_err();

        match err {
            DomainError::EventSubscriber {
                subscriber, event, ..
            } => {
                assert_eq!(subscriber, "s1");
                assert_eq!(event, EventName::BookDeleted);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(entries(&log), vec!["s1:b-1"]);
    }

    #[tokio::test]
    async fn continue_on_error_runs_everyone_and_aggregates() {
        let log = Log::default();
        let mut bus = InProcessEventBus::new(EventBusConfig {
            dispatch_policy: DispatchPolicy::ContinueOnError,
        });
        bus.subscribe(Recorder::failing("s1", vec![EventName::BookDeleted], &log));
        bus.subscribe(Recorder::new("s2", vec![EventName::BookDeleted], &log));
        bus.subscribe(Recorder::failing("s3", vec![EventName::BookDeleted], &log));

        let err = bus.publish(&book_deleted("b-1")).await.unwrap_err();

        match err {
            DomainError::DispatchFailed { failures } => assert_eq!(failures.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(entries(&log), vec!["s1:b-1", "s2:b-1", "s3:b-1"]);
    }

    #[tokio::test]
    async fn publish_all_delivers_in_supplied_order() {
        let log = Log::default();
        let bus = InProcessEventBus::builder()
            .subscribers(vec![Recorder::new(
                "s1",
                vec![EventName::BookDeleted, EventName::ArticleDeleted],
                &log,
            ) as Arc<dyn EventSubscriber>])
            .build();

        bus.publish_all(&[
            book_deleted("b-1"),
            article_deleted("a-1"),
            book_deleted("b-2"),
        ])
        .await
        .unwrap();

        assert_eq!(entries(&log), vec!["s1:b-1", "s1:a-1", "s1:b-2"]);
    }

    #[tokio::test]
    async fn publish_all_fail_fast_stops_at_first_failing_event() {
        let log = Log::default();
        let bus = InProcessEventBus::builder()
            .subscribers(vec![
                Recorder::new("books", vec![EventName::BookDeleted], &log) as Arc<dyn EventSubscriber>,
                Recorder::failing("articles", vec![EventName::ArticleDeleted], &log),
            ])
            .build();

        let result = bus
            .publish_all(&[article_deleted("a-1"), book_deleted("b-1")])
            .await;

        assert!(result.is_err());
        assert_eq!(entries(&log), vec!["articles:a-1"]);
    }

    #[test]
    fn dispatch_policy_parses_config_values() {
        assert_eq!("fail_fast".parse::<DispatchPolicy>().unwrap(), DispatchPolicy::FailFast);
        assert_eq!(
            " continue_on_error ".parse::<DispatchPolicy>().unwrap(),
            DispatchPolicy::ContinueOnError
        );
        assert!("retry".parse::<DispatchPolicy>().is_err());
    }
}
