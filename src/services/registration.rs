//! 设备注册模块
//!
//! 定义推送后端的设备注册接口、能力探测和HTTP实现

use crate::config::types::RegistrationConfig;
use crate::error::RegistrationError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// 设备注册传输trait
#[async_trait]
pub trait RegistrationTransport: Send + Sync {
    /// 注册设备
    async fn register(&self) -> Result<(), RegistrationError>;

    /// 注销设备
    async fn unregister(&self) -> Result<(), RegistrationError>;
}

/// 推送能力探测trait
pub trait CapabilityProbe: Send + Sync {
    /// 推送服务是否可用
    fn is_available(&self) -> bool;
}

/// 固定结果的能力探测
#[derive(Debug, Clone, Copy)]
pub struct StaticCapability(pub bool);

impl CapabilityProbe for StaticCapability {
    fn is_available(&self) -> bool {
        self.0
    }
}

/// 根据配置判断的能力探测
///
/// 启用注册且配置了后端地址和设备令牌时视为可用
#[derive(Debug, Clone, Copy)]
pub struct ConfiguredCapability {
    available: bool,
}

impl ConfiguredCapability {
    /// 从注册配置创建
    pub fn from_config(config: &RegistrationConfig) -> Self {
        let has_token = config
            .device_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty());

        Self {
            available: config.enabled && config.endpoint.is_some() && has_token,
        }
    }
}

impl CapabilityProbe for ConfiguredCapability {
    fn is_available(&self) -> bool {
        self.available
    }
}

/// 基于HTTP的设备注册
pub struct HttpRegistrationTransport {
    /// HTTP客户端
    client: Client,
    /// 后端地址
    endpoint: String,
    /// 设备令牌
    device_token: String,
    /// 推送平台
    platform: String,
}

impl HttpRegistrationTransport {
    /// 创建新的注册传输
    pub fn new(config: &RegistrationConfig) -> Result<Self, RegistrationError> {
        let endpoint = config
            .endpoint
            .clone()
            .ok_or(RegistrationError::MissingConfig("endpoint"))?;
        let device_token = config
            .device_token
            .clone()
            .ok_or(RegistrationError::MissingConfig("device_token"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            device_token,
            platform: config.platform.clone(),
        })
    }

    async fn post(&self, action: &str) -> Result<(), RegistrationError> {
        let url = format!("{}/{}", self.endpoint, action);
        debug!("发送设备{}请求: {}", action, url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "device_token": self.device_token,
                "platform": self.platform,
            }))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            info!("设备{}成功", action);
            Ok(())
        } else {
            Err(RegistrationError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl RegistrationTransport for HttpRegistrationTransport {
    async fn register(&self) -> Result<(), RegistrationError> {
        self.post("register").await
    }

    async fn unregister(&self) -> Result<(), RegistrationError> {
        self.post("unregister").await
    }
}

/// 空的注册传输实现
pub struct NoOpTransport;

#[async_trait]
impl RegistrationTransport for NoOpTransport {
    async fn register(&self) -> Result<(), RegistrationError> {
        Ok(())
    }

    async fn unregister(&self) -> Result<(), RegistrationError> {
        Ok(())
    }
}
