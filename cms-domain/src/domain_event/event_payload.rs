use super::EventName;
use crate::article::ArticleId;
use crate::book::BookId;
use crate::series::SeriesId;
use serde::{Deserialize, Serialize};

/// 各事件的载荷；变体与 `EventName` 一一对应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_name", content = "data")]
pub enum EventPayload {
    #[serde(rename = "book.created")]
    BookCreated {
        book_id: BookId,
        title: String,
        author: String,
    },
    /// 该标识的书籍已不存在于书籍存储中
    #[serde(rename = "book.deleted")]
    BookDeleted { book_id: BookId },
    #[serde(rename = "article.created")]
    ArticleCreated {
        article_id: ArticleId,
        title: String,
        book_ids: Vec<BookId>,
    },
    #[serde(rename = "article.updated")]
    ArticleUpdated {
        article_id: ArticleId,
        title: String,
        book_ids: Vec<BookId>,
    },
    #[serde(rename = "article.deleted")]
    ArticleDeleted { article_id: ArticleId },
    #[serde(rename = "article_series.created")]
    ArticleSeriesCreated {
        series_id: SeriesId,
        title: String,
        article_ids: Vec<ArticleId>,
    },
}

impl EventPayload {
    pub const fn name(&self) -> EventName {
        match self {
            EventPayload::BookCreated { .. } => EventName::BookCreated,
            EventPayload::BookDeleted { .. } => EventName::BookDeleted,
            EventPayload::ArticleCreated { .. } => EventName::ArticleCreated,
            EventPayload::ArticleUpdated { .. } => EventName::ArticleUpdated,
            EventPayload::ArticleDeleted { .. } => EventName::ArticleDeleted,
            EventPayload::ArticleSeriesCreated { .. } => EventName::ArticleSeriesCreated,
        }
    }
}
