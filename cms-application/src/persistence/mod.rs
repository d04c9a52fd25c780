//! 内存仓储实现（DashMap）
//!
//! 每个聚合的读-校验-写在同一个分片锁内完成，对单个聚合是原子的。
//! 存入的是聚合状态的副本，不包含待发布事件。
//!
mod inmemory_article_repository;
mod inmemory_book_repository;
mod inmemory_series_repository;

pub use inmemory_article_repository::InMemoryArticleRepository;
pub use inmemory_book_repository::InMemoryBookRepository;
pub use inmemory_series_repository::InMemorySeriesRepository;

use cms_domain::aggregate_root::AggregateRoot;
use cms_domain::error::{DomainError, DomainResult};
use dashmap::{DashMap, mapref::entry::Entry};
use std::hash::Hash;

/// 乐观锁写入：新标识直接插入；已存在时要求 已存版本 + 1 == 待存版本
pub(crate) fn save_versioned<A>(store: &DashMap<A::Id, A>, aggregate: &A) -> DomainResult<()>
where
    A: AggregateRoot + Clone,
    A::Id: Eq + Hash,
{
    let mut snapshot = aggregate.clone();
    snapshot.pull_events();

    match store.entry(aggregate.id().clone()) {
        Entry::Vacant(slot) => {
            slot.insert(snapshot);
        }
        Entry::Occupied(mut slot) => {
            let expected = slot.get().version() + 1;
            if aggregate.version() != expected {
                return Err(DomainError::VersionConflict {
                    expected,
                    actual: aggregate.version(),
                });
            }
            slot.insert(snapshot);
        }
    }
    Ok(())
}
