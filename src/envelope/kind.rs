//! 通知分类
//!
//! 把谓词求值结果折叠成一个标签枚举，便于日志、统计和命令行展示

use crate::envelope::Envelope;
use serde::Serialize;
use std::fmt;

/// 通知类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// 好友关注
    FriendFollow,
    /// 项目活动
    ProjectActivity,
    /// 项目提醒
    ProjectReminder,
    /// 项目更新
    ProjectUpdate,
    /// 无法分类
    Unclassified,
}

impl NotificationKind {
    /// 所有可分发的类别
    pub const ROUTABLE: [NotificationKind; 4] = [
        NotificationKind::FriendFollow,
        NotificationKind::ProjectActivity,
        NotificationKind::ProjectReminder,
        NotificationKind::ProjectUpdate,
    ];

    /// 对信封进行分类
    pub fn classify(envelope: &Envelope) -> Self {
        Self::ROUTABLE
            .into_iter()
            .find(|kind| kind.matches(envelope))
            .unwrap_or(NotificationKind::Unclassified)
    }

    /// 判断信封是否属于该类别
    pub fn matches(self, envelope: &Envelope) -> bool {
        match self {
            NotificationKind::FriendFollow => envelope.is_friend_follow(),
            NotificationKind::ProjectActivity => envelope.is_project_activity(),
            NotificationKind::ProjectReminder => envelope.is_project_reminder(),
            NotificationKind::ProjectUpdate => envelope.is_project_update_activity(),
            NotificationKind::Unclassified => NotificationKind::ROUTABLE
                .into_iter()
                .all(|kind| !kind.matches(envelope)),
        }
    }

    /// 类别名称
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::FriendFollow => "friend_follow",
            NotificationKind::ProjectActivity => "project_activity",
            NotificationKind::ProjectReminder => "project_reminder",
            NotificationKind::ProjectUpdate => "project_update",
            NotificationKind::Unclassified => "unclassified",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Envelope {
    /// 信封的类别
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::classify(self)
    }
}
