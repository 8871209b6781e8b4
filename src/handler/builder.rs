//! 通知构建器

use crate::handler::NotificationStyle;
use crate::services::{Icon, NavigationAction, Notification};
use chrono::Utc;

/// 通知构建器
///
/// 长文本样式与正文一致，样式字段来自配置
#[derive(Debug, Clone)]
pub struct NotificationBuilder {
    notification: Notification,
}

impl NotificationBuilder {
    /// 创建新的通知构建器
    pub fn new(key: i32, title: &str, text: &str, style: &NotificationStyle) -> Self {
        Self {
            notification: Notification {
                key,
                title: title.to_string(),
                text: text.to_string(),
                big_text: text.to_string(),
                small_icon: style.small_icon.clone(),
                accent_color: style.accent_color.clone(),
                auto_cancel: style.auto_cancel,
                posted_at: Utc::now(),
                large_icon: None,
                action: None,
            },
        }
    }

    /// 设置大图标
    pub fn large_icon(mut self, icon: Option<Icon>) -> Self {
        self.notification.large_icon = icon;
        self
    }

    /// 设置点击动作
    pub fn action(mut self, action: Option<NavigationAction>) -> Self {
        self.notification.action = action;
        self
    }

    /// 构建通知
    pub fn build(self) -> Notification {
        self.notification
    }
}
