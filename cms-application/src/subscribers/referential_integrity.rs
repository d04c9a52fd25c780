use super::batch::BatchReport;
use async_trait::async_trait;
use cms_domain::article::ArticleRepository;
use cms_domain::book::BookId;
use cms_domain::domain_event::{DomainEvent, EventName, EventPayload};
use cms_domain::entity::Entity;
use cms_domain::error::DomainResult;
use cms_domain::eventing::EventSubscriber;
use std::sync::Arc;
use tracing::debug;

/// 书籍删除后清理文章中对该书的引用
///
/// 只查询、只修改当前确实引用该书的文章；引用已不存在的文章不会被写入。
pub struct ReferentialIntegritySubscriber {
    articles: Arc<dyn ArticleRepository>,
}

impl ReferentialIntegritySubscriber {
    pub const NAME: &'static str = "article.referential_integrity";

    pub fn new(articles: Arc<dyn ArticleRepository>) -> Self {
        Self { articles }
    }

    async fn detach_book(&self, event: &DomainEvent, book_id: &BookId) -> DomainResult<()> {
        let articles = self.articles.find_articles_referencing_book(book_id).await?;
        debug!(book_id = %book_id, articles = articles.len(), "detaching deleted book from articles");

        let mut report = BatchReport::new(Self::NAME, event);
        for mut article in articles {
            if !article.remove_book_reference(book_id) {
                report.untouched();
                continue;
            }
            match self.articles.save(&article).await {
                Ok(()) => report.fixed(article.id()),
                Err(err) => report.failed(article.id(), err),
            }
        }
        report.finish()
    }
}

#[async_trait]
impl EventSubscriber for ReferentialIntegritySubscriber {
    fn subscriber_name(&self) -> &str {
        Self::NAME
    }

    fn subscribed_to(&self) -> Vec<EventName> {
        vec![EventName::BookDeleted]
    }

    async fn on(&self, event: &DomainEvent) -> DomainResult<()> {
        match event.payload() {
            EventPayload::BookDeleted { book_id } => self.detach_book(event, book_id).await,
            _ => Ok(()),
        }
    }
}
