//! 路由统计

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// 路由统计计数器
#[derive(Debug, Default)]
pub struct RouterStats {
    ingested: AtomicU64,
    dispatched: AtomicU64,
    unmatched: AtomicU64,
    presented: AtomicU64,
    presented_without_icon: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    registration_requests: AtomicU64,
    registration_skipped: AtomicU64,
    registration_failed: AtomicU64,
}

/// 路由统计快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RouterStatsSnapshot {
    /// 接收的信封数
    pub ingested: u64,
    /// 分发的处理任务数
    pub dispatched: u64,
    /// 未匹配任何订阅的信封数
    pub unmatched: u64,
    /// 已展示的通知数
    pub presented: u64,
    /// 无大图标展示的通知数
    pub presented_without_icon: u64,
    /// 因缺少字段跳过的处理数
    pub skipped: u64,
    /// 失败的处理数
    pub failed: u64,
    /// 发出的注册/注销请求数
    pub registration_requests: u64,
    /// 因能力不可用跳过的注册/注销数
    pub registration_skipped: u64,
    /// 失败的注册/注销请求数
    pub registration_failed: u64,
}

macro_rules! counter {
    ($($method:ident => $field:ident),* $(,)?) => {
        impl RouterStats {
            $(
                pub(crate) fn $method(&self) {
                    self.$field.fetch_add(1, Ordering::Relaxed);
                }
            )*
        }
    };
}

counter! {
    record_ingested => ingested,
    record_dispatched => dispatched,
    record_unmatched => unmatched,
    record_skipped => skipped,
    record_failed => failed,
    record_registration_request => registration_requests,
    record_registration_skipped => registration_skipped,
    record_registration_failed => registration_failed,
}

impl RouterStats {
    /// 记录一次展示
    pub(crate) fn record_presented(&self, with_icon: bool) {
        self.presented.fetch_add(1, Ordering::Relaxed);
        if !with_icon {
            self.presented_without_icon.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// 获取当前快照
    pub fn snapshot(&self) -> RouterStatsSnapshot {
        RouterStatsSnapshot {
            ingested: self.ingested.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            unmatched: self.unmatched.load(Ordering::Relaxed),
            presented: self.presented.load(Ordering::Relaxed),
            presented_without_icon: self.presented_without_icon.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            registration_requests: self.registration_requests.load(Ordering::Relaxed),
            registration_skipped: self.registration_skipped.load(Ordering::Relaxed),
            registration_failed: self.registration_failed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_counts() {
        let stats = RouterStats::default();
        stats.record_ingested();
        stats.record_ingested();
        stats.record_dispatched();
        stats.record_presented(true);
        stats.record_presented(false);
        stats.record_unmatched();

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.ingested, 2);
        assert_eq!(snapshot.dispatched, 1);
        assert_eq!(snapshot.presented, 2);
        assert_eq!(snapshot.presented_without_icon, 1);
        assert_eq!(snapshot.unmatched, 1);
        assert_eq!(snapshot.failed, 0);
    }
}
