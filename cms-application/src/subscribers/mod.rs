//! 跨聚合一致性订阅者
//!
//! 订阅者在主操作提交之后执行补偿写入（例如删除书籍后清理文章中的引用）。
//! 它们是无状态的，对同一事件重复投递是幂等的。
//!
mod batch;
mod referential_integrity;
mod series_membership;

pub use referential_integrity::ReferentialIntegritySubscriber;
pub use series_membership::SeriesMembershipSubscriber;
