//! 订阅定义
//!
//! 订阅是 (谓词, 处理器) 对，在路由器构建时确定，之后只读

use crate::envelope::{Envelope, NotificationKind};
use crate::handler::NotificationHandler;
use std::fmt;
use std::sync::Arc;

/// 信封谓词类型
pub type EnvelopePredicate = Arc<dyn Fn(&Envelope) -> bool + Send + Sync>;

/// 路由订阅
#[derive(Clone)]
pub struct Subscription {
    /// 订阅名称
    name: String,
    /// 匹配谓词
    predicate: EnvelopePredicate,
    /// 处理器
    handler: Arc<dyn NotificationHandler>,
}

impl Subscription {
    /// 创建新的订阅
    ///
    /// # 参数
    /// * `name` - 订阅名称，在同一路由器内唯一
    /// * `predicate` - 匹配谓词
    /// * `handler` - 匹配后执行的处理器
    pub fn new<F>(
        name: impl Into<String>,
        predicate: F,
        handler: Arc<dyn NotificationHandler>,
    ) -> Self
    where
        F: Fn(&Envelope) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            handler,
        }
    }

    /// 为指定类别创建订阅，名称取处理器名称
    pub fn for_kind(kind: NotificationKind, handler: Arc<dyn NotificationHandler>) -> Self {
        let name = handler.name();
        Self::new(name, move |envelope| kind.matches(envelope), handler)
    }

    /// 订阅名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 处理器
    pub fn handler(&self) -> &Arc<dyn NotificationHandler> {
        &self.handler
    }

    /// 判断信封是否匹配
    pub fn matches(&self, envelope: &Envelope) -> bool {
        (self.predicate)(envelope)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("name", &self.name)
            .field("handler", &self.handler.name())
            .finish()
    }
}
