//! 事件子系统（eventing）
//!
//! - `EventBus`：发布协议，作为显式依赖注入用例；
//! - `EventSubscriber`：订阅者协议；
//! - `InProcessEventBus`：进程内同步分发实现，启动期注册、运行期只读。
//!
pub mod bus;
pub mod bus_inprocess;
pub mod subscriber;

pub use bus::EventBus;
pub use bus_inprocess::{DispatchPolicy, EventBusConfig, InProcessEventBus};
pub use subscriber::EventSubscriber;
