//! 通知路由器
//!
//! 接收信封、按订阅谓词分发到处理器，处理器在工作任务中异步执行

use crate::config::types::{Config, RouterConfig};
use crate::envelope::{Envelope, NotificationKind};
use crate::error::RouterError;
use crate::handler::{
    FriendFollowHandler, HandlerContext, HandlerOutcome, NotificationHandler, NotificationStyle,
    ProjectActivityHandler, ProjectReminderHandler, ProjectUpdateHandler,
};
use crate::router::stats::{RouterStats, RouterStatsSnapshot};
use crate::router::subscription::Subscription;
use crate::services::{CapabilityProbe, Collaborators, RegistrationTransport};
use futures::future::join_all;
use futures::FutureExt;
use std::collections::HashSet;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 设备注册动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationAction {
    /// 注册
    Register,
    /// 注销
    Unregister,
}

impl fmt::Display for RegistrationAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationAction::Register => write!(f, "注册"),
            RegistrationAction::Unregister => write!(f, "注销"),
        }
    }
}

/// 路由器构建器
pub struct RouterBuilder {
    /// 协作服务
    collaborators: Collaborators,
    /// 路由器配置
    config: RouterConfig,
    /// 通知样式
    style: NotificationStyle,
    /// 是否注册默认订阅
    default_subscriptions: bool,
    /// 自定义订阅
    subscriptions: Vec<Subscription>,
}

impl RouterBuilder {
    /// 创建新的构建器
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            collaborators,
            config: RouterConfig::default(),
            style: NotificationStyle::default(),
            default_subscriptions: false,
            subscriptions: Vec::new(),
        }
    }

    /// 设置路由器配置
    pub fn router_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置通知样式
    pub fn style(mut self, style: NotificationStyle) -> Self {
        self.style = style;
        self
    }

    /// 注册四个默认订阅（好友关注、项目活动、项目提醒、项目更新）
    pub fn with_default_subscriptions(mut self) -> Self {
        self.default_subscriptions = true;
        self
    }

    /// 添加自定义订阅
    pub fn subscribe(mut self, subscription: Subscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    /// 创建处理器共享的上下文，供自定义处理器使用
    pub fn handler_context(&self) -> Arc<HandlerContext> {
        Arc::new(HandlerContext {
            images: Arc::clone(&self.collaborators.images),
            presenter: Arc::clone(&self.collaborators.presenter),
            navigator: Arc::clone(&self.collaborators.navigator),
            style: self.style.clone(),
        })
    }

    /// 构建路由器
    ///
    /// 必须在 tokio 运行时内调用
    pub fn build(self) -> Result<NotificationRouter, RouterError> {
        let runtime = Handle::try_current().map_err(|_| RouterError::NoRuntime)?;

        let mut subscriptions = Vec::with_capacity(self.subscriptions.len() + 4);
        if self.default_subscriptions {
            subscriptions.extend(default_subscriptions(self.handler_context()));
        }
        subscriptions.extend(self.subscriptions);

        let mut names = HashSet::new();
        for subscription in &subscriptions {
            if !names.insert(subscription.name().to_string()) {
                return Err(RouterError::DuplicateSubscription(
                    subscription.name().to_string(),
                ));
            }
        }

        debug!(
            "路由器已构建，订阅: {:?}",
            subscriptions.iter().map(Subscription::name).collect::<Vec<_>>()
        );

        Ok(NotificationRouter {
            subscriptions: subscriptions.into(),
            registration: self.collaborators.registration,
            capability: self.collaborators.capability,
            semaphore: Arc::new(Semaphore::new(self.config.max_concurrent_handlers.max(1))),
            runtime,
            in_flight: Mutex::new(Vec::new()),
            stats: Arc::new(RouterStats::default()),
        })
    }
}

/// 默认订阅表
fn default_subscriptions(context: Arc<HandlerContext>) -> Vec<Subscription> {
    let handlers: [(NotificationKind, Arc<dyn NotificationHandler>); 4] = [
        (
            NotificationKind::FriendFollow,
            Arc::new(FriendFollowHandler::new(Arc::clone(&context))),
        ),
        (
            NotificationKind::ProjectActivity,
            Arc::new(ProjectActivityHandler::new(Arc::clone(&context))),
        ),
        (
            NotificationKind::ProjectReminder,
            Arc::new(ProjectReminderHandler::new(Arc::clone(&context))),
        ),
        (
            NotificationKind::ProjectUpdate,
            Arc::new(ProjectUpdateHandler::new(context)),
        ),
    ];

    handlers
        .into_iter()
        .map(|(kind, handler)| Subscription::for_kind(kind, handler))
        .collect()
}

/// 通知路由器
pub struct NotificationRouter {
    /// 订阅表（构建后只读）
    subscriptions: Arc<[Subscription]>,
    /// 设备注册传输
    registration: Arc<dyn RegistrationTransport>,
    /// 推送能力探测
    capability: Arc<dyn CapabilityProbe>,
    /// 并发控制信号量
    semaphore: Arc<Semaphore>,
    /// 工作任务运行时
    runtime: Handle,
    /// 未完成的任务
    in_flight: Mutex<Vec<JoinHandle<()>>>,
    /// 统计信息
    stats: Arc<RouterStats>,
}

impl NotificationRouter {
    /// 创建带默认订阅的路由器并请求设备注册
    ///
    /// # 参数
    /// * `collaborators` - 协作服务
    /// * `config` - 应用配置
    ///
    /// # 返回
    /// * `Result<Self, RouterError>` - 路由器实例
    pub fn initialize(collaborators: Collaborators, config: &Config) -> Result<Self, RouterError> {
        let router = RouterBuilder::new(collaborators)
            .router_config(config.router.clone())
            .style(NotificationStyle::from(&config.presentation))
            .with_default_subscriptions()
            .build()?;

        router.request_device_registration();

        Ok(router)
    }

    /// 创建构建器
    pub fn builder(collaborators: Collaborators) -> RouterBuilder {
        RouterBuilder::new(collaborators)
    }

    /// 接收信封并分发到所有匹配的订阅
    ///
    /// 立即返回，处理器的失败不会传回调用方
    ///
    /// # 返回
    /// * `usize` - 匹配的订阅数
    pub fn ingest(&self, envelope: Envelope) -> usize {
        self.stats.record_ingested();
        let signature = envelope.signature;
        let envelope = Arc::new(envelope);

        let mut matched = 0;
        for subscription in self.subscriptions.iter() {
            if !subscription.matches(&envelope) {
                continue;
            }
            matched += 1;
            self.stats.record_dispatched();
            self.dispatch(subscription, Arc::clone(&envelope));
        }

        if matched == 0 {
            self.stats.record_unmatched();
            debug!("信封 {} 未匹配任何订阅，已丢弃", signature);
        }

        matched
    }

    /// 在工作任务中执行处理器
    fn dispatch(&self, subscription: &Subscription, envelope: Arc<Envelope>) {
        let handler = Arc::clone(subscription.handler());
        let semaphore = Arc::clone(&self.semaphore);
        let stats = Arc::clone(&self.stats);

        let task = self.runtime.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("获取处理器许可失败: {}", e);
                    stats.record_failed();
                    return;
                }
            };

            let outcome = AssertUnwindSafe(handler.handle(&envelope))
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(HandlerOutcome::Presented { with_icon })) => {
                    debug!(
                        "{} 已展示通知 {}（大图标: {}）",
                        handler.name(),
                        envelope.signature,
                        with_icon
                    );
                    stats.record_presented(with_icon);
                }
                Ok(Ok(HandlerOutcome::Skipped(reason))) => {
                    debug!(
                        "{} 跳过通知 {}: {}",
                        handler.name(),
                        envelope.signature,
                        reason
                    );
                    stats.record_skipped();
                }
                Ok(Err(e)) => {
                    error!(
                        "{} 展示通知 {} 失败: {}",
                        handler.name(),
                        envelope.signature,
                        e
                    );
                    stats.record_failed();
                }
                Err(_) => {
                    error!(
                        "{} 处理通知 {} 时发生 panic",
                        handler.name(),
                        envelope.signature
                    );
                    stats.record_failed();
                }
            }
        });

        self.track(task);
    }

    /// 请求设备注册
    ///
    /// 推送能力不可用时不做任何操作
    pub fn request_device_registration(&self) {
        self.request_registration(RegistrationAction::Register);
    }

    /// 请求设备注销
    ///
    /// 推送能力不可用时不做任何操作
    pub fn request_device_unregistration(&self) {
        self.request_registration(RegistrationAction::Unregister);
    }

    fn request_registration(&self, action: RegistrationAction) {
        if !self.capability.is_available() {
            debug!("推送能力不可用，跳过设备{}", action);
            self.stats.record_registration_skipped();
            return;
        }

        info!("请求设备{}", action);
        self.stats.record_registration_request();

        let transport = Arc::clone(&self.registration);
        let stats = Arc::clone(&self.stats);
        let task = self.runtime.spawn(async move {
            let result = match action {
                RegistrationAction::Register => transport.register().await,
                RegistrationAction::Unregister => transport.unregister().await,
            };

            if let Err(e) = result {
                error!("设备{}失败: {}", action, e);
                stats.record_registration_failed();
            }
        });

        self.track(task);
    }

    /// 等待所有未完成的任务结束
    pub async fn wait_idle(&self) {
        loop {
            let handles = std::mem::take(&mut *self.lock_in_flight());
            if handles.is_empty() {
                break;
            }

            for result in join_all(handles).await {
                if let Err(e) = result {
                    warn!("工作任务异常结束: {}", e);
                }
            }
        }
    }

    /// 订阅名称列表
    pub fn subscriptions(&self) -> Vec<&str> {
        self.subscriptions.iter().map(Subscription::name).collect()
    }

    /// 获取统计快照
    pub fn stats(&self) -> RouterStatsSnapshot {
        self.stats.snapshot()
    }

    fn track(&self, task: JoinHandle<()>) {
        let mut in_flight = self.lock_in_flight();
        in_flight.retain(|handle| !handle.is_finished());
        in_flight.push(task);
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for NotificationRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationRouter")
            .field("subscriptions", &self.subscriptions)
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
