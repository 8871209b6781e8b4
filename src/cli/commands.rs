//! 命令处理逻辑
//!
//! 实现各种CLI命令的处理逻辑

use crate::cli::args::{Args, Commands, OutputFormat, PresenterKind};
use crate::config::{get_default_config_path, Config, ConfigLoader, TomlConfigLoader};
use crate::envelope::Envelope;
use crate::error::Result;
use crate::router::{NotificationRouter, RegistrationAction};
use crate::services::{
    Collaborators, JsonPresenter, LogPresenter, NoOpPresenter, NotificationPresenter,
};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

/// 命令处理器trait
#[async_trait]
pub trait Command: Send + Sync {
    /// 执行命令
    async fn execute(&self, args: &Args) -> Result<()>;
}

/// 加载配置
///
/// 指定了配置文件时必须存在；未指定时默认路径不存在则使用默认配置
pub async fn load_config(args: &Args) -> Result<Config> {
    let loader = TomlConfigLoader::default();

    if let Some(ref path) = args.config {
        return loader.load_from_file(path).await;
    }

    let default_path = get_default_config_path();
    if default_path.exists() {
        loader.load_from_file(&default_path).await
    } else {
        info!("未找到配置文件，使用默认配置");
        Ok(Config::default())
    }
}

/// 解析按行分隔的JSON信封
///
/// 无法解析的行记录警告后跳过
pub fn parse_envelopes(content: &str) -> Vec<Envelope> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                warn!("第 {} 行信封格式无效，已跳过: {}", index + 1, e);
                None
            }
        })
        .collect()
}

/// 从文件或标准输入读取信封
async fn read_envelopes(input: Option<&Path>) -> Result<Vec<Envelope>> {
    let content = match input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut content = String::new();
            tokio::io::stdin().read_to_string(&mut content).await?;
            content
        }
    };

    Ok(parse_envelopes(&content))
}

/// 版本命令
pub struct VersionCommand;

#[async_trait]
impl Command for VersionCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Version { format } = &args.command {
            match format {
                OutputFormat::Json => {
                    let version_info = serde_json::json!({
                        "name": crate::APP_NAME,
                        "version": crate::VERSION,
                        "description": crate::APP_DESCRIPTION
                    });
                    println!("{}", serde_json::to_string_pretty(&version_info)?);
                }
                OutputFormat::Text => {
                    println!("{} v{}", crate::APP_NAME, crate::VERSION);
                    println!("{}", crate::APP_DESCRIPTION);
                }
            }
        }
        Ok(())
    }
}

/// 初始化命令
pub struct InitCommand;

#[async_trait]
impl Command for InitCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Init { config_path, force } = &args.command {
            self.create_config_file(config_path, *force).await
        } else {
            Ok(())
        }
    }
}

impl InitCommand {
    /// 配置文件模板
    pub const TEMPLATE: &'static str = include_str!("../../templates/push-router.toml");

    /// 创建配置文件
    async fn create_config_file(&self, config_path: &Path, force: bool) -> Result<()> {
        if config_path.exists() && !force {
            eprintln!("配置文件已存在: {}", config_path.display());
            eprintln!("使用 --force 参数覆盖现有文件");
            return Ok(());
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        tokio::fs::write(config_path, Self::TEMPLATE).await?;

        println!("配置文件已创建: {}", config_path.display());
        println!("请编辑配置文件以填写推送后端地址和设备令牌");

        Ok(())
    }
}

/// 验证命令
pub struct ValidateCommand;

#[async_trait]
impl Command for ValidateCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Validate { config_path } = &args.command {
            let path = config_path
                .clone()
                .or_else(|| args.config.clone())
                .unwrap_or_else(get_default_config_path);

            // 验证时不替换环境变量，避免因未设置的变量误报
            let loader = TomlConfigLoader::new(false);
            let config = loader.load_from_file(&path).await?;

            println!("✅ 配置文件验证通过: {}", path.display());
            if args.verbose {
                println!("  最大并发处理器数: {}", config.router.max_concurrent_handlers);
                println!("  深度链接协议: {}", config.navigation.scheme);
                println!(
                    "  设备注册: {}",
                    config
                        .registration
                        .endpoint
                        .as_deref()
                        .unwrap_or("未配置")
                );
            }
        }
        Ok(())
    }
}

/// 分类命令
pub struct ClassifyCommand;

#[async_trait]
impl Command for ClassifyCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Classify { input, format } = &args.command {
            let envelopes = read_envelopes(input.as_deref()).await?;

            for envelope in &envelopes {
                let kind = envelope.kind();
                match format {
                    OutputFormat::Json => {
                        let line = serde_json::json!({
                            "signature": envelope.signature,
                            "kind": kind,
                        });
                        println!("{}", line);
                    }
                    OutputFormat::Text => println!("{}\t{}", envelope.signature, kind),
                }
            }
        }
        Ok(())
    }
}

/// 分发命令
pub struct DispatchCommand;

#[async_trait]
impl Command for DispatchCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        if let Commands::Dispatch { input, output } = &args.command {
            let config = load_config(args).await?;
            let presenter: Arc<dyn NotificationPresenter> = match output {
                PresenterKind::Json => Arc::new(JsonPresenter::stdout()),
                PresenterKind::Log => Arc::new(LogPresenter),
                PresenterKind::None => Arc::new(NoOpPresenter),
            };

            let collaborators = Collaborators::from_config(&config, presenter)?;
            let router = NotificationRouter::builder(collaborators)
                .router_config(config.router.clone())
                .style((&config.presentation).into())
                .with_default_subscriptions()
                .build()?;

            let envelopes = read_envelopes(input.as_deref()).await?;
            info!("读取到 {} 个信封", envelopes.len());

            for envelope in envelopes {
                router.ingest(envelope);
            }
            router.wait_idle().await;

            let stats = router.stats();
            if args.verbose {
                eprintln!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                eprintln!(
                    "已接收 {} 个信封，展示 {} 条通知，跳过 {} 条，未匹配 {} 个，失败 {} 条",
                    stats.ingested, stats.presented, stats.skipped, stats.unmatched, stats.failed
                );
            }
        }
        Ok(())
    }
}

/// 设备注册/注销命令
pub struct RegistrationCommand {
    /// 注册动作
    pub action: RegistrationAction,
}

#[async_trait]
impl Command for RegistrationCommand {
    async fn execute(&self, args: &Args) -> Result<()> {
        let config = load_config(args).await?;
        let collaborators = Collaborators::from_config(&config, Arc::new(NoOpPresenter))?;
        let router = NotificationRouter::builder(collaborators)
            .router_config(config.router.clone())
            .build()?;

        match self.action {
            RegistrationAction::Register => router.request_device_registration(),
            RegistrationAction::Unregister => router.request_device_unregistration(),
        }
        router.wait_idle().await;

        let stats = router.stats();
        if stats.registration_skipped > 0 {
            println!("推送能力不可用，已跳过设备{}", self.action);
            return Ok(());
        }

        if stats.registration_failed > 0 {
            return Err(anyhow::anyhow!("设备{}失败，详见日志", self.action).into());
        }

        println!("设备{}成功", self.action);
        Ok(())
    }
}
