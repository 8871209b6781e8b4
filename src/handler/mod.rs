//! 通知处理器模块
//!
//! 每类信封对应一个处理器：选择图片、决定遮罩、附加导航动作并展示

pub mod builder;
pub mod follow;
pub mod project;

use crate::config::types::PresentationConfig;
use crate::envelope::Envelope;
use crate::error::PresentationError;
use crate::services::{Icon, ImageLoader, NavigationBuilder, NotificationPresenter};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

// 重新导出主要类型
pub use builder::NotificationBuilder;
pub use follow::FriendFollowHandler;
pub use project::{ProjectActivityHandler, ProjectReminderHandler, ProjectUpdateHandler};

/// 处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// 已展示
    Presented {
        /// 是否带有大图标
        with_icon: bool,
    },
    /// 缺少必需字段，跳过
    Skipped(SkipReason),
}

/// 跳过原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 缺少活动数据
    MissingActivity,
    /// 缺少用户头像
    MissingUserPhoto,
    /// 缺少项目图片
    MissingProjectPhoto,
    /// 缺少项目ID
    MissingProjectId,
    /// 缺少项目引用
    MissingProject,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::MissingActivity => "缺少活动数据",
            SkipReason::MissingUserPhoto => "缺少用户头像",
            SkipReason::MissingProjectPhoto => "缺少项目图片",
            SkipReason::MissingProjectId => "缺少项目ID",
            SkipReason::MissingProject => "缺少项目引用",
        };
        f.write_str(reason)
    }
}

/// 通知处理器trait
#[async_trait]
pub trait NotificationHandler: Send + Sync {
    /// 处理器名称
    fn name(&self) -> &'static str;

    /// 处理信封
    ///
    /// # 参数
    /// * `envelope` - 推送信封
    ///
    /// # 返回
    /// * `Result<HandlerOutcome, PresentationError>` - 处理结果，只有展示失败才返回错误
    async fn handle(&self, envelope: &Envelope) -> Result<HandlerOutcome, PresentationError>;
}

/// 通知的固定样式
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationStyle {
    /// 小图标资源名
    pub small_icon: String,
    /// 强调色
    pub accent_color: String,
    /// 点击后是否自动取消
    pub auto_cancel: bool,
}

impl From<&PresentationConfig> for NotificationStyle {
    fn from(config: &PresentationConfig) -> Self {
        Self {
            small_icon: config.small_icon.clone(),
            accent_color: config.accent_color.clone(),
            auto_cancel: config.auto_cancel,
        }
    }
}

impl Default for NotificationStyle {
    fn default() -> Self {
        Self::from(&PresentationConfig::default())
    }
}

/// 处理器共享的协作服务
pub struct HandlerContext {
    /// 图片加载器
    pub images: Arc<dyn ImageLoader>,
    /// 通知展示器
    pub presenter: Arc<dyn NotificationPresenter>,
    /// 导航动作构建器
    pub navigator: Arc<dyn NavigationBuilder>,
    /// 通知样式
    pub style: NotificationStyle,
}

impl HandlerContext {
    /// 开始构建通知
    pub fn builder(&self, envelope: &Envelope) -> NotificationBuilder {
        NotificationBuilder::new(
            envelope.signature,
            &envelope.alert.title,
            &envelope.alert.alert,
            &self.style,
        )
    }

    /// 加载大图标，失败时降级为无图标
    pub async fn load_icon(&self, url: &str, circle_mask: bool) -> Option<Icon> {
        match self.images.fetch(url, circle_mask).await {
            Ok(icon) => Some(icon),
            Err(e) => {
                warn!("加载大图标失败: {} - {}", url, e);
                None
            }
        }
    }

    /// 展示构建好的通知
    pub async fn present(
        &self,
        builder: NotificationBuilder,
    ) -> Result<HandlerOutcome, PresentationError> {
        let notification = builder.build();
        let with_icon = notification.large_icon.is_some();
        self.presenter.present(&notification).await?;
        Ok(HandlerOutcome::Presented { with_icon })
    }
}
