use super::{Article, ArticleId};
use crate::book::BookId;
use crate::error::DomainResult;
use async_trait::async_trait;

/// 文章仓储
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_by_id(&self, id: &ArticleId) -> DomainResult<Option<Article>>;

    /// 定向查询：仅返回当前引用该书籍的文章
    async fn find_articles_referencing_book(&self, book_id: &BookId)
    -> DomainResult<Vec<Article>>;

    /// 新建或更新（乐观锁）：已存在时要求已存版本 + 1 == `article.version()`，
    /// 否则返回 `VersionConflict`
    async fn save(&self, article: &Article) -> DomainResult<()>;

    async fn delete(&self, id: &ArticleId) -> DomainResult<()>;
}
