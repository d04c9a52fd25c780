use async_trait::async_trait;
use cms_domain::aggregate_root::AggregateRoot;
use cms_domain::article::{Article, ArticleId};
use cms_domain::book::{Book, BookId};
use cms_domain::domain_event::{BusinessContext, DomainEvent, EventName, EventPayload};
use cms_domain::error::{DomainError, DomainResult};
use cms_domain::eventing::{DispatchPolicy, EventBusConfig, EventSubscriber, InProcessEventBus};
use std::sync::{Arc, Mutex};

/// 记录收到的事件及其派生的业务上下文
#[derive(Default)]
struct Journal {
    entries: Mutex<Vec<(EventName, BusinessContext)>>,
}

#[async_trait]
impl EventSubscriber for Journal {
    fn subscriber_name(&self) -> &str {
        "journal"
    }

    fn subscribed_to(&self) -> Vec<EventName> {
        vec![EventName::BookCreated, EventName::BookDeleted]
    }

    async fn on(&self, event: &DomainEvent) -> DomainResult<()> {
        self.entries
            .lock()
            .unwrap()
            .push((event.name(), BusinessContext::caused_by(event)));
        Ok(())
    }
}

struct Rejecting;

#[async_trait]
impl EventSubscriber for Rejecting {
    fn subscriber_name(&self) -> &str {
        "rejecting"
    }

    fn subscribed_to(&self) -> Vec<EventName> {
        vec![EventName::ArticleDeleted]
    }

    async fn on(&self, _event: &DomainEvent) -> DomainResult<()> {
        Err(DomainError::InvalidState {
            reason: "read-only archive".into(),
        })
    }
}

#[tokio::test]
async fn pulled_events_reach_subscribers_in_recorded_order() -> anyhow::Result<()> {
    let journal = Arc::new(Journal::default());
    let mut bus = InProcessEventBus::default();
    bus.subscribe(journal.clone());
    let bus = bus.into_shared();

    let request = BusinessContext::builder()
        .correlation_id("req-42".to_string())
        .build();
    let mut book = Book::create(BookId::new("b-1"), "title", "author", request.clone())?;
    book.delete(request);

    let events = book.pull_events();
    assert!(!book.has_pending_events());
    bus.publish_all(&events).await?;

    let entries = journal.entries.lock().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, EventName::BookCreated);
    assert_eq!(entries[1].0, EventName::BookDeleted);

    // 由事件派生的后续操作沿用关联ID，因果ID 指向该事件
    let follow_up = &entries[1].1;
    assert_eq!(follow_up.correlation_id(), Some("req-42"));
    assert_eq!(follow_up.causation_id(), Some(events[1].event_id().to_string().as_str()));
    assert_eq!(follow_up.actor_type(), Some("system"));
    Ok(())
}

#[tokio::test]
async fn continue_on_error_reports_every_failure_across_a_batch() -> anyhow::Result<()> {
    let bus = InProcessEventBus::builder()
        .subscribers(vec![Arc::new(Rejecting) as Arc<dyn EventSubscriber>])
        .config(EventBusConfig {
            dispatch_policy: DispatchPolicy::ContinueOnError,
        })
        .build()
        .into_shared();

    let mut events = Vec::new();
    for id in ["a-1", "a-2"] {
        let mut article = Article::create(
            ArticleId::new(id),
            "title",
            "",
            Vec::<BookId>::new(),
            BusinessContext::default(),
        )?;
        article.delete(BusinessContext::default());
        events.extend(article.pull_events());
    }

    let err = bus.publish_all(&events).await.unwrap_err();
    match err {
        DomainError::DispatchFailed { failures } => {
            assert_eq!(failures.len(), 2);
            assert!(failures.iter().all(|f| f.to_string().contains("read-only archive")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        events[1].payload(),
        EventPayload::ArticleDeleted { .. }
    ));
    Ok(())
}
