//! 通知路由模块
//!
//! 提供订阅表、信封分发和设备注册请求功能

pub mod dispatcher;
pub mod stats;
pub mod subscription;

// 重新导出主要类型
pub use dispatcher::{NotificationRouter, RegistrationAction, RouterBuilder};
pub use stats::{RouterStats, RouterStatsSnapshot};
pub use subscription::{EnvelopePredicate, Subscription};
