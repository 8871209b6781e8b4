//! 项目相关通知处理器
//!
//! 项目图片从不使用圆形遮罩

use crate::envelope::Envelope;
use crate::error::PresentationError;
use crate::handler::{HandlerContext, HandlerOutcome, NotificationHandler, SkipReason};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 项目活动通知处理器
pub struct ProjectActivityHandler {
    context: Arc<HandlerContext>,
}

impl ProjectActivityHandler {
    /// 创建新的处理器
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl NotificationHandler for ProjectActivityHandler {
    fn name(&self) -> &'static str {
        "project_activity"
    }

    async fn handle(&self, envelope: &Envelope) -> Result<HandlerOutcome, PresentationError> {
        let Some(activity) = envelope.activity.as_ref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingActivity));
        };
        let Some(project_photo) = activity.project_photo.as_deref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingProjectPhoto));
        };
        let Some(project_id) = activity.project_id else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingProjectId));
        };

        debug!("处理项目活动通知: {} ({})", envelope.signature, activity.category);

        let icon = self.context.load_icon(project_photo, false).await;
        let action = self
            .context
            .navigator
            .project_action(project_id, envelope.signature);
        let builder = self
            .context
            .builder(envelope)
            .large_icon(icon)
            .action(Some(action));
        self.context.present(builder).await
    }
}

/// 项目提醒通知处理器
pub struct ProjectReminderHandler {
    context: Arc<HandlerContext>,
}

impl ProjectReminderHandler {
    /// 创建新的处理器
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl NotificationHandler for ProjectReminderHandler {
    fn name(&self) -> &'static str {
        "project_reminder"
    }

    async fn handle(&self, envelope: &Envelope) -> Result<HandlerOutcome, PresentationError> {
        let Some(project) = envelope.project.as_ref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingProject));
        };
        let Some(photo) = project.photo.as_deref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingProjectPhoto));
        };
        let Some(project_id) = project.id else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingProjectId));
        };

        debug!("处理项目提醒通知: {}", envelope.signature);

        let icon = self.context.load_icon(photo, false).await;
        let action = self
            .context
            .navigator
            .project_action(project_id, envelope.signature);
        let builder = self
            .context
            .builder(envelope)
            .large_icon(icon)
            .action(Some(action));
        self.context.present(builder).await
    }
}

/// 项目更新通知处理器
///
/// 导航动作只在信封携带项目ID时附加
pub struct ProjectUpdateHandler {
    context: Arc<HandlerContext>,
}

impl ProjectUpdateHandler {
    /// 创建新的处理器
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl NotificationHandler for ProjectUpdateHandler {
    fn name(&self) -> &'static str {
        "project_update"
    }

    async fn handle(&self, envelope: &Envelope) -> Result<HandlerOutcome, PresentationError> {
        let Some(activity) = envelope.activity.as_ref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingActivity));
        };
        let Some(project_photo) = activity.project_photo.as_deref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingProjectPhoto));
        };

        debug!(
            "处理项目更新通知: {} (update {:?})",
            envelope.signature, activity.update_id
        );

        let icon = self.context.load_icon(project_photo, false).await;
        let action = activity.project_id.map(|project_id| {
            self.context
                .navigator
                .project_action(project_id, envelope.signature)
        });
        let builder = self
            .context
            .builder(envelope)
            .large_icon(icon)
            .action(action);
        self.context.present(builder).await
    }
}
