//! 推送信封数据结构定义
//!
//! 信封由外部推送通道创建，路由器只消费一次，不做持久化

use serde::{Deserialize, Serialize};
use std::fmt;

/// 推送信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// 通知签名，用作展示和替换的唯一键
    pub signature: i32,
    /// 标题和正文
    #[serde(rename = "gcm", alias = "alert_content")]
    pub alert: AlertContent,
    /// 活动数据
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<Activity>,
    /// 项目引用（提醒类通知）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectRef>,
}

/// 通知文本内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContent {
    /// 通知标题
    pub title: String,
    /// 通知正文
    pub alert: String,
}

/// 信封中的活动数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// 活动类别
    pub category: ActivityCategory,
    /// 活动ID
    #[serde(default)]
    pub id: Option<u64>,
    /// 用户头像地址
    #[serde(default)]
    pub user_photo: Option<String>,
    /// 项目图片地址
    #[serde(default)]
    pub project_photo: Option<String>,
    /// 项目ID
    #[serde(default)]
    pub project_id: Option<u64>,
    /// 项目更新ID
    #[serde(default)]
    pub update_id: Option<u64>,
}

/// 信封中的项目引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    /// 项目ID
    #[serde(default)]
    pub id: Option<u64>,
    /// 项目图片地址
    #[serde(default)]
    pub photo: Option<String>,
}

/// 活动类别
///
/// 未知类别保留原始字符串，反序列化永远不会因为新类别而失败
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActivityCategory {
    /// 关注
    Follow,
    /// 支持
    Backing,
    /// 取消
    Cancellation,
    /// 众筹失败
    Failure,
    /// 项目上线
    Launch,
    /// 众筹成功
    Success,
    /// 项目暂停
    Suspension,
    /// 项目更新
    Update,
    /// 其他类别
    Other(String),
}

impl ActivityCategory {
    /// 类别的字符串形式
    pub fn as_str(&self) -> &str {
        match self {
            ActivityCategory::Follow => "follow",
            ActivityCategory::Backing => "backing",
            ActivityCategory::Cancellation => "cancellation",
            ActivityCategory::Failure => "failure",
            ActivityCategory::Launch => "launch",
            ActivityCategory::Success => "success",
            ActivityCategory::Suspension => "suspension",
            ActivityCategory::Update => "update",
            ActivityCategory::Other(value) => value,
        }
    }

    /// 是否属于项目活动类别
    pub fn is_project_category(&self) -> bool {
        matches!(
            self,
            ActivityCategory::Backing
                | ActivityCategory::Cancellation
                | ActivityCategory::Failure
                | ActivityCategory::Launch
                | ActivityCategory::Success
                | ActivityCategory::Suspension
        )
    }
}

impl From<String> for ActivityCategory {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "follow" => ActivityCategory::Follow,
            "backing" => ActivityCategory::Backing,
            "cancellation" => ActivityCategory::Cancellation,
            "failure" => ActivityCategory::Failure,
            "launch" => ActivityCategory::Launch,
            "success" => ActivityCategory::Success,
            "suspension" => ActivityCategory::Suspension,
            "update" => ActivityCategory::Update,
            _ => ActivityCategory::Other(value),
        }
    }
}

impl From<ActivityCategory> for String {
    fn from(category: ActivityCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Envelope {
    /// 创建只包含文本内容的信封
    pub fn new(signature: i32, title: impl Into<String>, alert: impl Into<String>) -> Self {
        Self {
            signature,
            alert: AlertContent {
                title: title.into(),
                alert: alert.into(),
            },
            activity: None,
            project: None,
        }
    }

    /// 附加活动数据
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activity = Some(activity);
        self
    }

    /// 附加项目引用
    pub fn with_project(mut self, project: ProjectRef) -> Self {
        self.project = Some(project);
        self
    }

    /// 是否为好友关注通知
    pub fn is_friend_follow(&self) -> bool {
        self.activity
            .as_ref()
            .is_some_and(|activity| activity.category == ActivityCategory::Follow)
    }

    /// 是否为项目活动通知
    pub fn is_project_activity(&self) -> bool {
        self.activity
            .as_ref()
            .is_some_and(|activity| activity.category.is_project_category())
    }

    /// 是否为项目提醒通知
    ///
    /// 提醒只携带项目引用，不携带活动数据
    pub fn is_project_reminder(&self) -> bool {
        self.activity.is_none() && self.project.is_some()
    }

    /// 是否为项目更新通知
    pub fn is_project_update_activity(&self) -> bool {
        self.activity
            .as_ref()
            .is_some_and(|activity| activity.category == ActivityCategory::Update)
    }
}

impl Activity {
    /// 创建指定类别的活动
    pub fn new(category: ActivityCategory) -> Self {
        Self {
            category,
            id: None,
            user_photo: None,
            project_photo: None,
            project_id: None,
            update_id: None,
        }
    }
}
