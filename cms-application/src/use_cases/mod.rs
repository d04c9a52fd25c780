//! 用例（命令与查询处理器）
//!
//! 写用例的统一流程：加载/创建聚合 → 调用聚合行为 → 持久化 → 取出事件交给总线发布。
//! 事件总线通过构造函数注入；发布失败作为命令错误返回，但此前的持久化已经生效。
//!
mod article;
mod book;
mod queries;
mod series;

pub use article::{
    CreateArticle, CreateArticleHandler, DeleteArticle, DeleteArticleHandler, UpdateArticle,
    UpdateArticleHandler,
};
pub use book::{CreateBook, CreateBookHandler, DeleteBook, DeleteBookHandler};
pub use queries::{
    GetArticle, GetArticleHandler, GetBook, GetBookHandler, GetSeries, GetSeriesHandler,
    ListArticlesByBook, ListArticlesByBookHandler,
};
pub use series::{CreateSeries, CreateSeriesHandler};

use crate::error::AppError;
use cms_domain::aggregate_root::AggregateRoot;
use cms_domain::article::{ArticleId, ArticleRepository};
use cms_domain::book::{BookId, BookRepository};
use cms_domain::error::DomainError;
use cms_domain::eventing::EventBus;
use tracing::{debug, warn};

const DETACH_ATTEMPTS: usize = 3;

/// 发布聚合在本次用例中记录的全部事件
pub(crate) async fn publish_pending<A: AggregateRoot>(
    bus: &dyn EventBus,
    aggregate: &mut A,
) -> Result<(), AppError> {
    let events = aggregate.pull_events();
    bus.publish_all(&events).await?;
    Ok(())
}

/// 校验引用的书籍全部存在，缺失时列出所有缺失的标识
pub(crate) async fn ensure_books_exist(
    books: &dyn BookRepository,
    book_ids: &[BookId],
) -> Result<(), AppError> {
    let mut missing = Vec::new();
    for id in book_ids {
        if !books.exists(id).await? {
            missing.push(id.to_string());
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "referenced book(s) not found: {}",
            missing.join(", ")
        )))
    }
}

/// 保存后复查文章引用的书籍
///
/// 书籍可能在存在性校验与文章保存之间被删除，此时引用清理订阅者已经执行完毕、
/// 看不到这篇文章。这里按订阅者相同的方式移除已不存在的书籍引用；
/// 与其他写入冲突时重新加载后重试。
pub(crate) async fn detach_deleted_books(
    books: &dyn BookRepository,
    articles: &dyn ArticleRepository,
    article_id: &ArticleId,
) -> Result<(), AppError> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let Some(mut article) = articles.find_by_id(article_id).await? else {
            return Ok(());
        };

        let mut gone = Vec::new();
        for id in article.book_ids() {
            if !books.exists(id).await? {
                gone.push(id.clone());
            }
        }
        if gone.is_empty() {
            return Ok(());
        }
        for id in &gone {
            article.remove_book_reference(id);
        }

        match articles.save(&article).await {
            Ok(()) => {
                warn!(
                    article_id = %article_id,
                    books = ?gone,
                    "book deleted concurrently, reference removed after save"
                );
                return Ok(());
            }
            Err(DomainError::VersionConflict { .. }) if attempt < DETACH_ATTEMPTS => {
                debug!(article_id = %article_id, attempt, "version conflict while detaching, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }
}
