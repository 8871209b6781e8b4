//! 好友关注通知处理器

use crate::envelope::Envelope;
use crate::error::PresentationError;
use crate::handler::{HandlerContext, HandlerOutcome, NotificationHandler, SkipReason};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 好友关注通知处理器
///
/// 使用圆形遮罩的用户头像，不附加导航动作
pub struct FriendFollowHandler {
    context: Arc<HandlerContext>,
}

impl FriendFollowHandler {
    /// 创建新的处理器
    pub fn new(context: Arc<HandlerContext>) -> Self {
        Self { context }
    }
}

#[async_trait]
impl NotificationHandler for FriendFollowHandler {
    fn name(&self) -> &'static str {
        "friend_follow"
    }

    async fn handle(&self, envelope: &Envelope) -> Result<HandlerOutcome, PresentationError> {
        let Some(activity) = envelope.activity.as_ref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingActivity));
        };
        let Some(user_photo) = activity.user_photo.as_deref() else {
            return Ok(HandlerOutcome::Skipped(SkipReason::MissingUserPhoto));
        };

        debug!("处理好友关注通知: {}", envelope.signature);

        let icon = self.context.load_icon(user_photo, true).await;
        let builder = self.context.builder(envelope).large_icon(icon);
        self.context.present(builder).await
    }
}
