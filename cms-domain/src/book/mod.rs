//! 书籍上下文（Book）
//!
//! 书籍被删除时记录 `BookDeleted`，由文章上下文的订阅者清理悬挂引用。
//!
mod repository;

pub use repository::BookRepository;

use crate::aggregate_root::AggregateRoot;
use crate::domain_event::{BusinessContext, EventPayload};
use crate::entity::{Entity, ensure_not_blank};
use crate::error::DomainResult;
use chrono::{DateTime, Utc};
use cms_macros::{entity, entity_id};

#[entity_id]
pub struct BookId(String);

#[entity(id = BookId, aggregate_root = "book")]
pub struct Book {
    title: String,
    author: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Book {
    /// 创建书籍并记录 `BookCreated`
    pub fn create(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        context: BusinessContext,
    ) -> DomainResult<Self> {
        let title = title.into();
        let author = author.into();
        ensure_not_blank("book.title", &title)?;
        ensure_not_blank("book.author", &author)?;

        let now = Utc::now();
        let mut book = <Book as Entity>::new(id, 1);
        book.title = title;
        book.author = author;
        book.created_at = now;
        book.updated_at = now;

        let payload = EventPayload::BookCreated {
            book_id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
        };
        book.raise(payload, context);
        Ok(book)
    }

    /// 删除书籍：记录 `BookDeleted`，实际移除由用例通过仓储完成
    pub fn delete(&mut self, context: BusinessContext) {
        let payload = EventPayload::BookDeleted {
            book_id: self.id.clone(),
        };
        self.raise(payload, context);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
