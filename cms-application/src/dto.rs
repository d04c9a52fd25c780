use cms_domain::article::Article;
use cms_domain::book::Book;
use cms_domain::entity::Entity;
use cms_domain::series::Series;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 数据传输对象（DTO）
///
/// 应用层的输出载体，面向接口层序列化，不直接暴露领域对象。
pub trait Dto: Serialize + Send + Sync + 'static {}

impl<T: Dto> Dto for Option<T> {}

impl<T: Dto> Dto for Vec<T> {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub version: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dto for BookDto {}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id().to_string(),
            title: book.title().to_string(),
            author: book.author().to_string(),
            version: book.version(),
            created_at: book.created_at(),
            updated_at: book.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleDto {
    pub id: String,
    pub title: String,
    pub content: String,
    /// 按标识排序
    pub book_ids: Vec<String>,
    pub version: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dto for ArticleDto {}

impl From<&Article> for ArticleDto {
    fn from(article: &Article) -> Self {
        Self {
            id: article.id().to_string(),
            title: article.title().to_string(),
            content: article.content().to_string(),
            book_ids: article.book_ids().iter().map(ToString::to_string).collect(),
            version: article.version(),
            created_at: article.created_at(),
            updated_at: article.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesDto {
    pub id: String,
    pub title: String,
    pub article_ids: Vec<String>,
    pub version: usize,
}

impl Dto for SeriesDto {}

impl From<&Series> for SeriesDto {
    fn from(series: &Series) -> Self {
        Self {
            id: series.id().to_string(),
            title: series.title().to_string(),
            article_ids: series.article_ids().iter().map(ToString::to_string).collect(),
            version: series.version(),
        }
    }
}
