//! 推送信封模块
//!
//! 定义推送信封的数据结构和分类谓词

pub mod kind;
pub mod types;

// 重新导出主要类型
pub use kind::NotificationKind;
pub use types::{Activity, ActivityCategory, AlertContent, Envelope, ProjectRef};
