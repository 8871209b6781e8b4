//! Push Router 主程序入口
//!
//! 推送通知路由工具

use anyhow::{Context, Result};
use clap::Parser;
use push_router::cli::args::{Args, Commands};
use push_router::cli::commands::{
    ClassifyCommand, Command, DispatchCommand, InitCommand, RegistrationCommand,
    ValidateCommand, VersionCommand,
};
use push_router::config::{get_default_config_path, ConfigLoader, TomlConfigLoader};
use push_router::logging::{LogConfig, LoggingSystem};
use push_router::router::RegistrationAction;
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志系统，命令行日志级别优先于配置文件
    let mut log_config = configured_log_config(&args).await;
    if let Some(level) = args.log_level.clone() {
        log_config.level = level.into();
    }

    let _logging_system =
        LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    debug!("Push Router v{} 启动", push_router::VERSION);

    if let Err(e) = execute_command(&args).await {
        error!("命令执行失败: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// 读取配置文件中的日志设置，读取失败时使用默认设置
async fn configured_log_config(args: &Args) -> LogConfig {
    let path = args.config.clone().unwrap_or_else(get_default_config_path);
    if !path.exists() {
        return LogConfig::default();
    }

    TomlConfigLoader::new(true)
        .load_from_file(&path)
        .await
        .map(|config| LogConfig::from_config(&config))
        .unwrap_or_default()
}

/// 执行CLI命令
async fn execute_command(args: &Args) -> push_router::error::Result<()> {
    let command: Box<dyn Command> = match &args.command {
        Commands::Dispatch { .. } => Box::new(DispatchCommand),
        Commands::Classify { .. } => Box::new(ClassifyCommand),
        Commands::Register => Box::new(RegistrationCommand {
            action: RegistrationAction::Register,
        }),
        Commands::Unregister => Box::new(RegistrationCommand {
            action: RegistrationAction::Unregister,
        }),
        Commands::Init { .. } => Box::new(InitCommand),
        Commands::Validate { .. } => Box::new(ValidateCommand),
        Commands::Version { .. } => Box::new(VersionCommand),
    };

    command.execute(args).await
}
