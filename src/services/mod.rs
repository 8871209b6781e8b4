//! 外部协作服务模块
//!
//! 图片加载、通知展示、导航动作和设备注册的接口及参考实现

pub mod image;
pub mod navigation;
pub mod presenter;
pub mod registration;

use crate::config::types::Config;
use crate::error::PushRouterError;
use std::sync::Arc;
use tracing::warn;

// 重新导出主要类型
pub use image::{HttpImageLoader, Icon, IconShape, ImageLoader};
pub use navigation::{DeepLinkNavigator, LaunchFlags, NavigationAction, NavigationBuilder};
pub use presenter::{
    JsonPresenter, LogPresenter, NoOpPresenter, Notification, NotificationPresenter,
};
pub use registration::{
    CapabilityProbe, ConfiguredCapability, HttpRegistrationTransport, NoOpTransport,
    RegistrationTransport, StaticCapability,
};

/// 路由器依赖的全部协作服务
#[derive(Clone)]
pub struct Collaborators {
    /// 图片加载器
    pub images: Arc<dyn ImageLoader>,
    /// 通知展示器
    pub presenter: Arc<dyn NotificationPresenter>,
    /// 导航动作构建器
    pub navigator: Arc<dyn NavigationBuilder>,
    /// 设备注册传输
    pub registration: Arc<dyn RegistrationTransport>,
    /// 推送能力探测
    pub capability: Arc<dyn CapabilityProbe>,
}

impl Collaborators {
    /// 根据配置创建协作服务
    ///
    /// 注册配置不完整时使用空的注册传输，能力探测会报告不可用
    ///
    /// # 参数
    /// * `config` - 应用配置
    /// * `presenter` - 通知展示器
    pub fn from_config(
        config: &Config,
        presenter: Arc<dyn NotificationPresenter>,
    ) -> Result<Self, PushRouterError> {
        let capability = ConfiguredCapability::from_config(&config.registration);
        let registration: Arc<dyn RegistrationTransport> = if capability.is_available() {
            Arc::new(HttpRegistrationTransport::new(&config.registration)?)
        } else {
            warn!("设备注册配置不完整，注册请求将被跳过");
            Arc::new(NoOpTransport)
        };

        Ok(Self {
            images: Arc::new(HttpImageLoader::new(&config.image)?),
            presenter,
            navigator: Arc::new(DeepLinkNavigator::new(config.navigation.scheme.clone())),
            registration,
            capability: Arc::new(capability),
        })
    }
}
