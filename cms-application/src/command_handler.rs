use crate::{command::Command, context::AppContext, error::AppError};
use async_trait::async_trait;

/// 命令处理器：一个命令类型对应一个处理器
///
/// 写用例在此完成 加载 → 调用聚合行为 → 持久化 → 发布事件；
/// 事件发布失败时返回的错误不代表持久化被撤销。
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, ctx: &AppContext, cmd: C) -> Result<(), AppError>;
}
