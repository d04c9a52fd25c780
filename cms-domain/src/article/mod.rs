//! 文章上下文（Article）
//!
//! 文章可引用任意数量的书籍（集合语义）。书籍删除后由订阅者调用
//! [`Article::remove_book_reference`] 清理悬挂引用，该补偿写入不记录事件。
//!
mod repository;

pub use repository::ArticleRepository;

use crate::aggregate_root::AggregateRoot;
use crate::book::BookId;
use crate::domain_event::{BusinessContext, EventPayload};
use crate::entity::{Entity, ensure_not_blank};
use crate::error::DomainResult;
use chrono::{DateTime, Utc};
use cms_macros::{entity, entity_id};
use std::collections::BTreeSet;

#[entity_id]
pub struct ArticleId(String);

#[entity(id = ArticleId, aggregate_root = "article")]
pub struct Article {
    title: String,
    content: String,
    book_ids: BTreeSet<BookId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Article {
    /// 创建文章并记录 `ArticleCreated`
    ///
    /// 被引用书籍是否存在由应用层校验，这里只保证字段合法。
    pub fn create(
        id: ArticleId,
        title: impl Into<String>,
        content: impl Into<String>,
        book_ids: impl IntoIterator<Item = BookId>,
        context: BusinessContext,
    ) -> DomainResult<Self> {
        let title = title.into();
        ensure_not_blank("article.title", &title)?;

        let now = Utc::now();
        let mut article = <Article as Entity>::new(id, 1);
        article.title = title;
        article.content = content.into();
        article.book_ids = book_ids.into_iter().collect();
        article.created_at = now;
        article.updated_at = now;

        let payload = EventPayload::ArticleCreated {
            article_id: article.id.clone(),
            title: article.title.clone(),
            book_ids: article.book_ids_vec(),
        };
        article.raise(payload, context);
        Ok(article)
    }

    /// 用户修订：整体替换标题、正文与引用，版本 +1 并记录 `ArticleUpdated`
    pub fn revise(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        book_ids: impl IntoIterator<Item = BookId>,
        context: BusinessContext,
    ) -> DomainResult<()> {
        let title = title.into();
        ensure_not_blank("article.title", &title)?;

        self.title = title;
        self.content = content.into();
        self.book_ids = book_ids.into_iter().collect();
        self.touch();

        let payload = EventPayload::ArticleUpdated {
            article_id: self.id.clone(),
            title: self.title.clone(),
            book_ids: self.book_ids_vec(),
        };
        self.raise(payload, context);
        Ok(())
    }

    /// 删除文章：记录 `ArticleDeleted`
    pub fn delete(&mut self, context: BusinessContext) {
        let payload = EventPayload::ArticleDeleted {
            article_id: self.id.clone(),
        };
        self.raise(payload, context);
    }

    /// 移除对某本书的引用
    ///
    /// 引用存在时移除并推进版本与 `updated_at`，返回 `true`；
    /// 不存在时不做任何修改，返回 `false`。不记录事件。
    pub fn remove_book_reference(&mut self, book_id: &BookId) -> bool {
        if !self.book_ids.remove(book_id) {
            return false;
        }
        self.touch();
        true
    }

    pub fn references_book(&self, book_id: &BookId) -> bool {
        self.book_ids.contains(book_id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn book_ids(&self) -> &BTreeSet<BookId> {
        &self.book_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn book_ids_vec(&self) -> Vec<BookId> {
        self.book_ids.iter().cloned().collect()
    }

    fn touch(&mut self) {
        self.version += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::EventName;

    fn article(book_ids: &[&str]) -> Article {
        let mut article = Article::create(
            ArticleId::new("a-1"),
            "Ownership in practice",
            "...",
            book_ids.iter().map(|id| BookId::new(*id)),
            BusinessContext::default(),
        )
        .unwrap();
        article.pull_events();
        article
    }

    #[test]
    fn create_dedups_book_ids_and_records_event() {
        let mut article = Article::create(
            ArticleId::new("a-1"),
            "title",
            "body",
            [BookId::new("b-2"), BookId::new("b-1"), BookId::new("b-2")],
            BusinessContext::default(),
        )
        .unwrap();

        assert_eq!(article.version(), 1);
        assert_eq!(article.book_ids().len(), 2);

        let events = article.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].payload(),
            &EventPayload::ArticleCreated {
                article_id: ArticleId::new("a-1"),
                title: "title".into(),
                book_ids: vec![BookId::new("b-1"), BookId::new("b-2")],
            }
        );
    }

    #[test]
    fn remove_present_reference_bumps_version_once() {
        let mut article = article(&["b-1", "b-2"]);
        let before = article.updated_at();

        assert!(article.remove_book_reference(&BookId::new("b-1")));

        assert_eq!(article.version(), 2);
        assert!(article.updated_at() >= before);
        assert!(!article.references_book(&BookId::new("b-1")));
        assert!(article.references_book(&BookId::new("b-2")));
        assert!(!article.has_pending_events());
    }

    #[test]
    fn remove_absent_reference_is_identity() {
        let mut article = article(&["b-2"]);
        let before = article.clone();

        assert!(!article.remove_book_reference(&BookId::new("b-1")));
        assert!(!article.remove_book_reference(&BookId::new("b-1")));

        assert_eq!(article.version(), before.version());
        assert_eq!(article.updated_at(), before.updated_at());
        assert_eq!(article.book_ids(), before.book_ids());
    }

    #[test]
    fn revise_replaces_fields_and_records_update() {
        let mut article = article(&["b-1"]);

        article
            .revise("new title", "new body", [BookId::new("b-3")], BusinessContext::default())
            .unwrap();

        assert_eq!(article.version(), 2);
        assert_eq!(article.title(), "new title");
        assert_eq!(article.content(), "new body");
        assert!(article.references_book(&BookId::new("b-3")));
        assert!(!article.references_book(&BookId::new("b-1")));

        let events = article.pull_events();
        assert_eq!(events[0].name(), EventName::ArticleUpdated);
    }

    #[test]
    fn revise_with_blank_title_changes_nothing() {
        let mut article = article(&["b-1"]);

        assert!(article.revise(" ", "x", Vec::<BookId>::new(), BusinessContext::default()).is_err());

        assert_eq!(article.version(), 1);
        assert_eq!(article.title(), "Ownership in practice");
        assert!(!article.has_pending_events());
    }

    #[test]
    fn delete_records_article_deleted() {
        let mut article = article(&[]);
        article.delete(BusinessContext::default());
        assert_eq!(article.pull_events()[0].name(), EventName::ArticleDeleted);
    }
}
