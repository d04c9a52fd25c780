use super::{Book, BookId};
use crate::error::DomainResult;
use async_trait::async_trait;

/// 书籍仓储（读写契约，存储实现由基础设施层提供）
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: &BookId) -> DomainResult<Option<Book>>;

    async fn exists(&self, id: &BookId) -> DomainResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// 新建或更新；更新时要求 `book.version()` 恰为已存版本 + 1
    async fn save(&self, book: &Book) -> DomainResult<()>;

    /// 删除不存在的书籍返回 `NotFound`
    async fn delete(&self, id: &BookId) -> DomainResult<()>;
}
