//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Push Router - 推送通知路由工具
#[derive(Parser, Debug, Clone)]
#[command(
    name = "push-router",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None
)]
pub struct Args {
    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "PUSH_ROUTER_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        help = "日志级别（默认使用配置文件中的级别）",
        env = "PUSH_ROUTER_LOG_LEVEL"
    )]
    pub log_level: Option<LogLevel>,

    /// 是否启用详细输出
    #[arg(short, long, help = "启用详细输出")]
    pub verbose: bool,

    /// 子命令
    #[command(subcommand)]
    pub command: Commands,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// 子命令定义
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// 路由信封并展示通知
    Dispatch {
        /// 信封文件（每行一个JSON信封，不指定则读取标准输入）
        #[arg(short, long, value_name = "FILE", help = "信封文件，不指定则读取标准输入")]
        input: Option<PathBuf>,

        /// 通知输出方式
        #[arg(short, long, value_enum, default_value = "json", help = "通知输出方式")]
        output: PresenterKind,
    },

    /// 输出每个信封的分类结果
    Classify {
        /// 信封文件（每行一个JSON信封，不指定则读取标准输入）
        #[arg(short, long, value_name = "FILE", help = "信封文件，不指定则读取标准输入")]
        input: Option<PathBuf>,

        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },

    /// 向推送后端注册设备
    Register,

    /// 从推送后端注销设备
    Unregister,

    /// 初始化配置文件
    Init {
        /// 配置文件路径
        #[arg(value_name = "PATH", default_value = "push-router.toml", help = "配置文件路径")]
        config_path: PathBuf,

        /// 强制覆盖现有文件
        #[arg(short, long, help = "强制覆盖现有文件")]
        force: bool,
    },

    /// 验证配置文件
    Validate {
        /// 配置文件路径（不指定则使用全局配置路径）
        #[arg(value_name = "PATH", help = "配置文件路径")]
        config_path: Option<PathBuf>,
    },

    /// 显示版本信息
    Version {
        /// 输出格式
        #[arg(short, long, value_enum, default_value = "text", help = "输出格式")]
        format: OutputFormat,
    },
}

/// 输出格式枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    /// 文本格式
    Text,
    /// JSON格式
    Json,
}

/// 通知输出方式
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum PresenterKind {
    /// 每个通知输出一行JSON到标准输出
    Json,
    /// 写入日志
    Log,
    /// 不输出
    None,
}
