//! 文章系列（Series）
//!
//! 系列按顺序引用文章；文章删除后由订阅者调用 [`Series::remove_article`] 清理。
//!
mod repository;

pub use repository::SeriesRepository;

use crate::aggregate_root::AggregateRoot;
use crate::article::ArticleId;
use crate::domain_event::{BusinessContext, EventPayload};
use crate::entity::{Entity, ensure_not_blank};
use crate::error::DomainResult;
use chrono::{DateTime, Utc};
use cms_macros::{entity, entity_id};

#[entity_id]
pub struct SeriesId(String);

#[entity(id = SeriesId, aggregate_root = "article_series")]
pub struct Series {
    title: String,
    article_ids: Vec<ArticleId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Series {
    /// 创建系列；重复的文章只保留第一次出现的位置
    pub fn create(
        id: SeriesId,
        title: impl Into<String>,
        article_ids: impl IntoIterator<Item = ArticleId>,
        context: BusinessContext,
    ) -> DomainResult<Self> {
        let title = title.into();
        ensure_not_blank("series.title", &title)?;

        let mut ordered: Vec<ArticleId> = Vec::new();
        for id in article_ids {
            if !ordered.contains(&id) {
                ordered.push(id);
            }
        }

        let now = Utc::now();
        let mut series = <Series as Entity>::new(id, 1);
        series.title = title;
        series.article_ids = ordered;
        series.created_at = now;
        series.updated_at = now;

        let payload = EventPayload::ArticleSeriesCreated {
            series_id: series.id.clone(),
            title: series.title.clone(),
            article_ids: series.article_ids.clone(),
        };
        series.raise(payload, context);
        Ok(series)
    }

    /// 移除文章；存在时推进版本并返回 `true`，否则原样返回 `false`
    pub fn remove_article(&mut self, article_id: &ArticleId) -> bool {
        let before = self.article_ids.len();
        self.article_ids.retain(|id| id != article_id);
        if self.article_ids.len() == before {
            return false;
        }
        self.version += 1;
        self.updated_at = Utc::now();
        true
    }

    pub fn contains_article(&self, article_id: &ArticleId) -> bool {
        self.article_ids.contains(article_id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn article_ids(&self) -> &[ArticleId] {
        &self.article_ids
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
