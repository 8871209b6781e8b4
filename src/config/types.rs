//! 配置数据结构定义
//!
//! 定义应用程序的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// 主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// 路由器配置
    #[serde(default)]
    pub router: RouterConfig,
    /// 通知样式配置
    #[serde(default)]
    pub presentation: PresentationConfig,
    /// 图片加载配置
    #[serde(default)]
    pub image: ImageConfig,
    /// 导航配置
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// 设备注册配置
    #[serde(default)]
    pub registration: RegistrationConfig,
    /// 日志输出配置
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 路由器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouterConfig {
    /// 最大并发处理器数
    #[serde(default = "default_max_concurrent_handlers")]
    pub max_concurrent_handlers: usize,
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// 通知样式配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PresentationConfig {
    /// 小图标资源名
    #[serde(default = "default_small_icon")]
    pub small_icon: String,
    /// 强调色（#RRGGBB）
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
    /// 点击后是否自动取消
    #[serde(default = "default_auto_cancel")]
    pub auto_cancel: bool,
}

/// 图片加载配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_image_timeout")]
    pub request_timeout_seconds: u64,
    /// 图片最大字节数
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    /// 是否裁剪为正方形
    #[serde(default = "default_crop_square")]
    pub crop_square: bool,
}

/// 导航配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    /// 深度链接协议名
    #[serde(default = "default_scheme")]
    pub scheme: String,
}

/// 设备注册配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistrationConfig {
    /// 是否启用设备注册
    #[serde(default = "default_registration_enabled")]
    pub enabled: bool,
    /// 注册后端地址
    pub endpoint: Option<String>,
    /// 设备令牌
    pub device_token: Option<String>,
    /// 推送平台
    #[serde(default = "default_platform")]
    pub platform: String,
    /// 请求超时时间（秒）
    #[serde(default = "default_registration_timeout")]
    pub request_timeout_seconds: u64,
}

/// 日志输出配置
///
/// 日志级别由 `router.log_level` 决定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// 是否输出到控制台，关闭时写入 `file_path`
    #[serde(default = "default_log_console")]
    pub console: bool,
    /// 日志文件路径
    pub file_path: Option<PathBuf>,
    /// 是否使用JSON格式
    #[serde(default)]
    pub json_format: bool,
    /// 模块级别日志控制，例如 `"push_router::router" = "debug"`
    #[serde(default)]
    pub module_levels: HashMap<String, String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_concurrent_handlers: default_max_concurrent_handlers(),
            log_level: default_log_level(),
        }
    }
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            small_icon: default_small_icon(),
            accent_color: default_accent_color(),
            auto_cancel: default_auto_cancel(),
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_image_timeout(),
            max_bytes: default_max_bytes(),
            crop_square: default_crop_square(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
        }
    }
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            enabled: default_registration_enabled(),
            endpoint: None,
            device_token: None,
            platform: default_platform(),
            request_timeout_seconds: default_registration_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console: default_log_console(),
            file_path: None,
            json_format: false,
            module_levels: HashMap::new(),
        }
    }
}

// 默认值函数
fn default_max_concurrent_handlers() -> usize {
    16
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_small_icon() -> String {
    "ic_kickstarter_k".to_string()
}
fn default_accent_color() -> String {
    "#05CE78".to_string()
}
fn default_auto_cancel() -> bool {
    true
}
fn default_image_timeout() -> u64 {
    10
}
fn default_max_bytes() -> usize {
    5 * 1024 * 1024
}
fn default_crop_square() -> bool {
    true
}
fn default_scheme() -> String {
    "ksr".to_string()
}
fn default_registration_enabled() -> bool {
    true
}
fn default_platform() -> String {
    "fcm".to_string()
}
fn default_registration_timeout() -> u64 {
    10
}
fn default_log_console() -> bool {
    true
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &Config) -> Result<(), String> {
    // 验证路由器配置
    if config.router.max_concurrent_handlers == 0 {
        return Err("最大并发处理器数不能为0".to_string());
    }

    let valid_log_levels = ["debug", "info", "warn", "error"];
    if !valid_log_levels.contains(&config.router.log_level.as_str()) {
        return Err(format!(
            "无效的日志级别: {}，支持的级别: {:?}",
            config.router.log_level, valid_log_levels
        ));
    }

    // 验证通知样式
    if config.presentation.small_icon.trim().is_empty() {
        return Err("小图标资源名不能为空".to_string());
    }

    if !is_hex_color(&config.presentation.accent_color) {
        return Err(format!(
            "无效的强调色: {}，格式应为 #RRGGBB",
            config.presentation.accent_color
        ));
    }

    // 验证图片配置
    if config.image.request_timeout_seconds == 0 {
        return Err("图片请求超时时间不能为0".to_string());
    }

    if config.image.max_bytes == 0 {
        return Err("图片最大字节数不能为0".to_string());
    }

    // 验证导航配置
    let scheme = &config.navigation.scheme;
    if scheme.is_empty()
        || !scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return Err(format!("无效的深度链接协议名: {:?}", scheme));
    }

    // 验证注册配置
    let registration = &config.registration;
    if let Some(ref endpoint) = registration.endpoint {
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(format!("注册后端地址格式无效: {}", endpoint));
        }
    }

    let valid_platforms = ["fcm", "apns"];
    if !valid_platforms.contains(&registration.platform.as_str()) {
        return Err(format!(
            "无效的推送平台: {}，支持的平台: {:?}",
            registration.platform, valid_platforms
        ));
    }

    if registration.request_timeout_seconds == 0 {
        return Err("注册请求超时时间不能为0".to_string());
    }

    // 验证日志配置
    let logging = &config.logging;
    if !logging.console && logging.file_path.is_none() {
        return Err("关闭控制台日志时必须配置日志文件路径".to_string());
    }

    let valid_module_levels = ["trace", "debug", "info", "warn", "error", "off"];
    for (module, level) in &logging.module_levels {
        if !valid_module_levels.contains(&level.as_str()) {
            return Err(format!("模块 {} 的日志级别无效: {}", module, level));
        }
    }

    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
