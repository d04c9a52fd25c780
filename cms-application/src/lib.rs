//! CMS 应用层（cms-application）
//!
//! - 命令/查询及其处理器、进程内命令总线与查询总线；
//! - 用例：书籍、文章与系列的增删改查；
//! - 跨聚合一致性订阅者（删除书籍后清理文章引用等）；
//! - 内存仓储、运行配置与应用装配。
//!
pub mod bootstrap;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod inmemory_query_bus;
pub mod persistence;
pub mod query;
pub mod query_bus;
pub mod query_handler;
pub mod subscribers;
pub mod use_cases;

pub use bootstrap::{Application, Repositories};
pub use config::CmsConfig;
pub use inmemory_command_bus::InMemoryCommandBus;
pub use inmemory_query_bus::InMemoryQueryBus;
