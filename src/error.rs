//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Push Router 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum PushRouterError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 路由器相关错误
    #[error("路由器错误: {0}")]
    Router(#[from] RouterError),

    /// 图片加载错误
    #[error("图片加载错误: {0}")]
    Image(#[from] ImageError),

    /// 通知展示错误
    #[error("通知展示错误: {0}")]
    Presentation(#[from] PresentationError),

    /// 设备注册错误
    #[error("设备注册错误: {0}")]
    Registration(#[from] RegistrationError),

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// JSON序列化/反序列化错误
    #[error("JSON错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

/// 路由器错误类型
#[derive(Error, Debug)]
pub enum RouterError {
    /// 构建路由器时不在 tokio 运行时内
    #[error("路由器必须在 tokio 运行时内创建")]
    NoRuntime,

    /// 订阅名称重复
    #[error("重复的订阅名称: {0}")]
    DuplicateSubscription(String),
}

/// 图片加载错误类型
#[derive(Error, Debug)]
pub enum ImageError {
    /// HTTP请求错误
    #[error("HTTP请求失败: {0}")]
    RequestError(#[from] reqwest::Error),

    /// 图片地址无效
    #[error("无效的图片地址: {url}")]
    InvalidUrl { url: String },

    /// 服务端返回非成功状态码
    #[error("图片请求返回状态码 {status}: {url}")]
    BadStatus { url: String, status: u16 },

    /// 响应内容不是图片
    #[error("响应内容类型不是图片: {content_type}")]
    NotAnImage { content_type: String },

    /// 图片超过大小限制
    #[error("图片大小 {size} 字节超过限制 {limit} 字节")]
    TooLarge { size: usize, limit: usize },
}

/// 通知展示错误类型
#[derive(Error, Debug)]
pub enum PresentationError {
    /// 展示失败
    #[error("通知展示失败: {0}")]
    PresentError(String),

    /// 输出错误
    #[error("通知输出失败: {0}")]
    Io(#[from] std::io::Error),

    /// 序列化错误
    #[error("通知序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 设备注册错误类型
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// HTTP请求错误
    #[error("HTTP请求失败: {0}")]
    RequestError(#[from] reqwest::Error),

    /// 缺少注册所需配置
    #[error("注册配置缺失: {0}")]
    MissingConfig(&'static str),

    /// 后端拒绝请求
    #[error("注册后端返回状态码 {status}")]
    Rejected { status: u16 },
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, PushRouterError>;
