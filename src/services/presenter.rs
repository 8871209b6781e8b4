//! 通知展示模块
//!
//! 定义通知对象和展示接口，同一签名的通知在平台侧只保留一条

use crate::error::PresentationError;
use crate::services::image::Icon;
use crate::services::navigation::NavigationAction;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

/// 待展示的通知
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    /// 展示键（信封签名）
    pub key: i32,
    /// 标题
    pub title: String,
    /// 正文
    pub text: String,
    /// 展开后的长文本
    pub big_text: String,
    /// 小图标资源名
    pub small_icon: String,
    /// 强调色
    pub accent_color: String,
    /// 点击后是否自动取消
    pub auto_cancel: bool,
    /// 发布时间
    pub posted_at: DateTime<Utc>,
    /// 大图标
    #[serde(skip_serializing_if = "Option::is_none")]
    pub large_icon: Option<Icon>,
    /// 点击动作
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<NavigationAction>,
}

/// 通知展示器trait
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    /// 展示通知，相同 `key` 的通知替换之前的展示
    ///
    /// # 参数
    /// * `notification` - 待展示的通知
    async fn present(&self, notification: &Notification) -> Result<(), PresentationError>;
}

/// 写入日志的展示器
pub struct LogPresenter;

#[async_trait]
impl NotificationPresenter for LogPresenter {
    async fn present(&self, notification: &Notification) -> Result<(), PresentationError> {
        info!(
            key = notification.key,
            has_icon = notification.large_icon.is_some(),
            action = notification.action.as_ref().map(|a| a.uri.as_str()),
            "展示通知: {} - {}",
            notification.title,
            notification.text
        );
        Ok(())
    }
}

/// 以JSON行格式输出的展示器
pub struct JsonPresenter<W: Write + Send> {
    /// 输出目标
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonPresenter<W> {
    /// 创建新的JSON展示器
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// 取回输出目标
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JsonPresenter<std::io::Stdout> {
    /// 输出到标准输出
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

#[async_trait]
impl<W: Write + Send> NotificationPresenter for JsonPresenter<W> {
    async fn present(&self, notification: &Notification) -> Result<(), PresentationError> {
        let line = serde_json::to_string(notification)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| PresentationError::PresentError("输出锁已损坏".to_string()))?;
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }
}

/// 空的展示器实现（用于测试或禁用展示）
pub struct NoOpPresenter;

#[async_trait]
impl NotificationPresenter for NoOpPresenter {
    async fn present(&self, _notification: &Notification) -> Result<(), PresentationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::image::IconShape;

    fn notification() -> Notification {
        Notification {
            key: 9,
            title: "Funded!".to_string(),
            text: "Your project was funded".to_string(),
            big_text: "Your project was funded".to_string(),
            small_icon: "ic_kickstarter_k".to_string(),
            accent_color: "#05CE78".to_string(),
            auto_cancel: true,
            posted_at: Utc::now(),
            large_icon: Some(Icon::new(
                "https://img.example.com/p.jpg",
                IconShape::Square,
                vec![1, 2, 3],
            )),
            action: None,
        }
    }

    #[tokio::test]
    async fn test_json_presenter_writes_one_line() {
        let presenter = JsonPresenter::new(Vec::new());
        presenter.present(&notification()).await.unwrap();

        let output = String::from_utf8(presenter.into_inner()).unwrap();
        assert_eq!(output.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["key"], 9);
        assert_eq!(value["large_icon"]["shape"], "square");
        assert_eq!(value["large_icon"]["byte_len"], 3);
        assert!(value["large_icon"].get("bytes").is_none());
        assert!(value.get("action").is_none());
    }

    #[test]
    fn test_log_and_noop_presenters_succeed() {
        tokio_test::assert_ok!(tokio_test::block_on(LogPresenter.present(&notification())));
        tokio_test::assert_ok!(tokio_test::block_on(NoOpPresenter.present(&notification())));
    }
}
