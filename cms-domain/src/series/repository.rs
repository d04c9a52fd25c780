use super::{Series, SeriesId};
use crate::article::ArticleId;
use crate::error::DomainResult;
use async_trait::async_trait;

/// 文章系列仓储
#[async_trait]
pub trait SeriesRepository: Send + Sync {
    async fn find_by_id(&self, id: &SeriesId) -> DomainResult<Option<Series>>;

    /// 定向查询：仅返回包含该文章的系列
    async fn find_series_containing_article(
        &self,
        article_id: &ArticleId,
    ) -> DomainResult<Vec<Series>>;

    /// 新建或更新（乐观锁，规则同文章仓储）
    async fn save(&self, series: &Series) -> DomainResult<()>;
}
