//! Push Router - 推送通知路由工具
//!
//! 接收外部推送通道送来的信封，按类别分发给处理器并展示通知：
//! - 好友关注、项目活动、项目提醒、项目更新四类信封
//! - 处理器在工作任务中异步执行，不阻塞接收
//! - 图片加载失败时降级为无大图标的通知
//! - 按推送能力决定是否向后端注册设备

pub mod cli;
pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;
pub mod logging;
pub mod router;
pub mod services;

// 重新导出主要类型
pub use config::Config;
pub use envelope::{Envelope, NotificationKind};
pub use error::PushRouterError;
pub use router::{NotificationRouter, RouterBuilder, Subscription};
pub use services::Collaborators;

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序名称
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
