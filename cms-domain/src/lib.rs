//! CMS 领域层（cms-domain）
//!
//! 书籍、文章与文章系列三个聚合，以及连接它们的进程内领域事件机制：
//! - 聚合根（`aggregate_root`）记录未提交事件，用例持久化后取出发布；
//! - 领域事件（`domain_event`）为封闭的名称/载荷枚举，名称即路由键；
//! - 事件系统（`eventing`）：订阅者接口与同步的进程内总线；
//! - 各上下文（`book`、`article`、`series`）的仓储接口。
//!
//! 跨聚合一致性（例如删除书籍后清理文章引用）由应用层订阅者完成，
//! 聚合之间不直接互相调用。
//!
pub mod aggregate_root;
pub mod article;
pub mod book;
pub mod domain_event;
pub mod entity;
pub mod error;
pub mod eventing;
pub mod series;

// 允许在本 crate 内部通过 ::cms_domain 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::cms_domain 路径。
extern crate self as cms_domain;
