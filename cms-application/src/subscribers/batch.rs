use cms_domain::domain_event::{BusinessContext, DomainEvent};
use cms_domain::error::{BatchFailure, DomainError, DomainResult};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// 批量补偿的执行记录
///
/// 单个条目写入失败时记录并继续处理后续条目；已修复的条目不回滚。
/// 结束时若存在失败，返回 `BatchPartiallyFailed`。
pub(crate) struct BatchReport<'a> {
    subscriber: &'static str,
    event: &'a DomainEvent,
    /// 补偿写入的业务语境：沿用事件的关联ID，因果ID 指向该事件
    context: BusinessContext,
    fixed: usize,
    untouched: usize,
    failures: Vec<BatchFailure>,
}

impl<'a> BatchReport<'a> {
    pub(crate) fn new(subscriber: &'static str, event: &'a DomainEvent) -> Self {
        Self {
            subscriber,
            event,
            context: BusinessContext::caused_by(event),
            fixed: 0,
            untouched: 0,
            failures: Vec::new(),
        }
    }

    pub(crate) fn fixed(&mut self, item_id: impl Display) {
        self.fixed += 1;
        info!(
            subscriber = self.subscriber,
            correlation_id = self.context.correlation_id(),
            causation_id = self.context.causation_id(),
            item_id = %item_id,
            "compensating write applied"
        );
    }

    pub(crate) fn untouched(&mut self) {
        self.untouched += 1;
    }

    pub(crate) fn failed(&mut self, item_id: impl Display, err: DomainError) {
        warn!(
            subscriber = self.subscriber,
            correlation_id = self.context.correlation_id(),
            causation_id = self.context.causation_id(),
            item_id = %item_id,
            error = %err,
            "compensating write failed, continuing with remaining items"
        );
        self.failures.push(BatchFailure {
            item_id: item_id.to_string(),
            reason: err.to_string(),
        });
    }

    pub(crate) fn finish(self) -> DomainResult<()> {
        debug!(
            subscriber = self.subscriber,
            event_id = %self.event.event_id(),
            fixed = self.fixed,
            untouched = self.untouched,
            failed = self.failures.len(),
            "batch finished"
        );
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(DomainError::BatchPartiallyFailed {
            succeeded: self.fixed + self.untouched,
            failures: self.failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_domain::book::BookId;
    use cms_domain::domain_event::EventPayload;

    fn event() -> DomainEvent {
        DomainEvent::builder()
            .aggregate_id("b-1".to_string())
            .aggregate_type("book".to_string())
            .payload(EventPayload::BookDeleted {
                book_id: BookId::new("b-1"),
            })
            .build()
    }

    #[test]
    fn context_points_back_to_the_event() {
        let event = event();
        let report = BatchReport::new("test", &event);
        let expected = event.event_id().to_string();
        assert_eq!(report.context.causation_id(), Some(expected.as_str()));
        assert_eq!(report.context.actor_type(), Some("system"));
    }

    #[test]
    fn all_succeeded_is_ok() {
        let event = event();
        let mut report = BatchReport::new("test", &event);
        report.fixed("a-1");
        report.untouched();
        assert!(report.finish().is_ok());
    }

    #[test]
    fn failures_are_collected_after_successes() {
        let event = event();
        let mut report = BatchReport::new("test", &event);
        report.fixed("a-1");
        report.failed("a-2", DomainError::repository("timeout"));
        report.fixed("a-3");

        match report.finish().unwrap_err() {
            DomainError::BatchPartiallyFailed {
                succeeded,
                failures,
            } => {
                assert_eq!(succeeded, 2);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].item_id, "a-2");
                assert!(failures[0].reason.contains("timeout"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
