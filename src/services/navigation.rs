//! 导航动作模块
//!
//! 为通知构建点击后打开项目页面的动作

use serde::Serialize;

/// 导航启动标志
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LaunchFlags {
    /// 清除目标页面之上的页面
    pub clear_top: bool,
    /// 目标页面已在栈顶时复用
    pub single_top: bool,
    /// 在新任务中启动
    pub new_task: bool,
}

impl Default for LaunchFlags {
    fn default() -> Self {
        Self {
            clear_top: true,
            single_top: true,
            new_task: true,
        }
    }
}

/// 通知的导航动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationAction {
    /// 项目ID
    pub project_id: u64,
    /// 请求码，与通知签名一致
    pub request_code: i32,
    /// 深度链接地址
    pub uri: String,
    /// 启动标志
    pub flags: LaunchFlags,
    /// 是否替换同一请求码的已有动作
    pub replace_existing: bool,
}

/// 导航动作构建器trait
pub trait NavigationBuilder: Send + Sync {
    /// 构建打开项目页面的动作
    ///
    /// # 参数
    /// * `project_id` - 项目ID
    /// * `key` - 通知签名
    fn project_action(&self, project_id: u64, key: i32) -> NavigationAction;
}

/// 基于深度链接的导航构建器
#[derive(Debug, Clone)]
pub struct DeepLinkNavigator {
    /// 协议名
    scheme: String,
}

impl DeepLinkNavigator {
    /// 创建新的导航构建器
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }
}

impl NavigationBuilder for DeepLinkNavigator {
    fn project_action(&self, project_id: u64, key: i32) -> NavigationAction {
        NavigationAction {
            project_id,
            request_code: key,
            uri: format!("{}://projects/{}", self.scheme, project_id),
            flags: LaunchFlags::default(),
            replace_existing: true,
        }
    }
}
