//! cms-macros：领域建模过程宏
//!
//! - `#[entity]`：为实体/聚合根补齐 `id`、`version`（以及可选的待发布事件列表）字段，
//!   并实现 `::cms_domain::entity::Entity` 与 `::cms_domain::aggregate_root::AggregateRoot`；
//! - `#[entity_id]`：为单字段 tuple struct 形式的标识类型补齐派生与转换实现。
//!
use proc_macro::TokenStream;

mod derive_utils;
mod entity;
mod entity_id;
mod field_utils;

/// 实体宏
///
/// 支持参数：`#[entity(id = BookId, aggregate_root = "book", debug = true)]`
/// - `id`：标识类型，默认 `String`
/// - `aggregate_root`：聚合类型名；设置后追加 `uncommitted_events` 字段并实现 `AggregateRoot`
/// - `debug`：是否派生 `Debug`，默认 `true`
#[proc_macro_attribute]
pub fn entity(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity::expand(attr, item)
}

/// 实体 ID 宏，仅支持单字段 tuple struct，例如 `struct BookId(String);`
#[proc_macro_attribute]
pub fn entity_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_id::expand(attr, item)
}
