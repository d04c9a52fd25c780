use super::batch::BatchReport;
use async_trait::async_trait;
use cms_domain::article::ArticleId;
use cms_domain::domain_event::{DomainEvent, EventName, EventPayload};
use cms_domain::entity::Entity;
use cms_domain::error::DomainResult;
use cms_domain::eventing::EventSubscriber;
use cms_domain::series::SeriesRepository;
use std::sync::Arc;

/// 文章删除后将其从所有包含它的系列中移除
pub struct SeriesMembershipSubscriber {
    series: Arc<dyn SeriesRepository>,
}

impl SeriesMembershipSubscriber {
    pub const NAME: &'static str = "series.membership";

    pub fn new(series: Arc<dyn SeriesRepository>) -> Self {
        Self { series }
    }

    async fn drop_article(&self, event: &DomainEvent, article_id: &ArticleId) -> DomainResult<()> {
        let containing = self.series.find_series_containing_article(article_id).await?;

        let mut report = BatchReport::new(Self::NAME, event);
        for mut series in containing {
            if !series.remove_article(article_id) {
                report.untouched();
                continue;
            }
            match self.series.save(&series).await {
                Ok(()) => report.fixed(series.id()),
                Err(err) => report.failed(series.id(), err),
            }
        }
        report.finish()
    }
}

#[async_trait]
impl EventSubscriber for SeriesMembershipSubscriber {
    fn subscriber_name(&self) -> &str {
        Self::NAME
    }

    fn subscribed_to(&self) -> Vec<EventName> {
        vec![EventName::ArticleDeleted]
    }

    async fn on(&self, event: &DomainEvent) -> DomainResult<()> {
        match event.payload() {
            EventPayload::ArticleDeleted { article_id } => {
                self.drop_article(event, article_id).await
            }
            _ => Ok(()),
        }
    }
}
