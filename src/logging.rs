//! 日志系统模块
//!
//! 提供结构化日志配置和管理功能

use crate::config::types::Config;
use log::LevelFilter;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// 全局日志初始化状态
#[derive(Debug)]
struct GlobalLoggingState {
    /// 是否已初始化
    initialized: bool,
    /// 初始化结果
    init_result: Result<(), String>,
    /// 当前配置
    current_config: Option<LogConfig>,
}

impl Default for GlobalLoggingState {
    fn default() -> Self {
        Self {
            initialized: false,
            init_result: Ok(()),
            current_config: None,
        }
    }
}

/// 全局日志状态管理器
static GLOBAL_LOGGING_STATE: OnceLock<Mutex<GlobalLoggingState>> = OnceLock::new();

/// 日志配置结构
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 日志级别
    pub level: LevelFilter,
    /// 日志文件路径（可选）
    pub file_path: Option<PathBuf>,
    /// 是否输出到控制台
    pub console: bool,
    /// 是否使用JSON格式
    pub json_format: bool,
    /// 模块级别日志控制
    pub module_levels: HashMap<String, LevelFilter>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            file_path: None,
            console: true,
            json_format: false,
            module_levels: HashMap::new(),
        }
    }
}

impl LogConfig {
    /// 从配置文件中的日志级别字符串创建
    pub fn from_level_str(level: &str) -> Self {
        Self {
            level: parse_level(level),
            ..Default::default()
        }
    }

    /// 从应用配置创建
    ///
    /// 级别取 `router.log_level`，输出方式取 `[logging]` 段
    pub fn from_config(config: &Config) -> Self {
        let logging = &config.logging;

        Self {
            level: parse_level(&config.router.log_level),
            file_path: logging.file_path.clone(),
            console: logging.console,
            json_format: logging.json_format,
            module_levels: logging
                .module_levels
                .iter()
                .map(|(module, level)| (module.clone(), parse_level(level)))
                .collect(),
        }
    }
}

/// 解析日志级别字符串，无法识别时使用 info
fn parse_level(level: &str) -> LevelFilter {
    match level {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 日志系统管理器
pub struct LoggingSystem {
    /// 配置
    config: LogConfig,
}

impl LoggingSystem {
    /// 初始化日志系统
    ///
    /// 线程安全的单次初始化，重复调用直接返回
    pub fn setup_logging(config: LogConfig) -> anyhow::Result<Self> {
        Self::setup_logging_with_options(config, false)
    }

    /// 初始化日志系统（带选项）
    ///
    /// # 参数
    /// * `config` - 日志配置
    /// * `force_reinit` - 是否强制重新初始化（主要用于测试）
    pub fn setup_logging_with_options(
        config: LogConfig,
        force_reinit: bool,
    ) -> anyhow::Result<Self> {
        let state_mutex =
            GLOBAL_LOGGING_STATE.get_or_init(|| Mutex::new(GlobalLoggingState::default()));

        {
            let state = state_mutex
                .lock()
                .map_err(|_| anyhow::anyhow!("日志状态锁已损坏"))?;
            if state.initialized && !force_reinit {
                return match &state.init_result {
                    Ok(()) => Ok(Self::new(config)),
                    Err(e) => Err(anyhow::anyhow!("日志系统之前初始化失败: {}", e)),
                };
            }
        }

        let init_result = Self::perform_initialization(&config);

        {
            let mut state = state_mutex
                .lock()
                .map_err(|_| anyhow::anyhow!("日志状态锁已损坏"))?;
            state.initialized = true;
            state.current_config = Some(config.clone());
            state.init_result = init_result.as_ref().map(|_| ()).map_err(|e| e.to_string());
        }

        init_result?;
        Ok(Self::new(config))
    }

    fn new(config: LogConfig) -> Self {
        Self { config }
    }

    /// 当前实例使用的配置
    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// 执行实际的日志系统初始化
    fn perform_initialization(config: &LogConfig) -> anyhow::Result<()> {
        // log crate 到 tracing 的桥接
        Self::init_log_tracer()?;
        Self::init_tracing_subscriber(config)?;
        Ok(())
    }

    /// 初始化 LogTracer
    fn init_log_tracer() -> anyhow::Result<()> {
        use tracing_log::LogTracer;

        static LOG_TRACER_INIT: OnceLock<Result<(), String>> = OnceLock::new();

        let result = LOG_TRACER_INIT.get_or_init(|| LogTracer::init().map_err(|e| e.to_string()));

        result
            .as_ref()
            .map_err(|e| anyhow::anyhow!("LogTracer初始化失败: {}", e))?;
        Ok(())
    }

    /// 初始化 tracing subscriber
    fn init_tracing_subscriber(config: &LogConfig) -> anyhow::Result<()> {
        let mut env_filter = EnvFilter::from_default_env()
            .add_directive(Self::convert_level_to_directive(config.level));

        // 添加模块级别过滤
        for (module, level) in &config.module_levels {
            match format!("{}={}", module, Self::level_to_string(*level)).parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(e) => eprintln!("忽略无效的模块日志级别 {}: {}", module, e),
            }
        }

        let fmt_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            fmt::layer()
                .with_timer(fmt::time::ChronoUtc::rfc_3339())
                .with_ansi(true)
                .with_target(true)
                .with_thread_ids(true)
                .boxed()
        };

        let result = if config.console {
            registry().with(env_filter).with(fmt_layer).try_init()
        } else if let Some(file_path) = &config.file_path {
            // 文件输出 (不包含轮转)
            let file = std::fs::File::create(file_path)
                .map_err(|e| anyhow::anyhow!("创建日志文件失败: {}", e))?;
            let file_layer = fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true);

            registry().with(env_filter).with(file_layer).try_init()
        } else {
            registry().with(env_filter).with(fmt_layer).try_init()
        };

        match result {
            Ok(()) => {
                tracing::info!("日志系统初始化完成");
                tracing::debug!("日志配置: {:?}", config);
                Ok(())
            }
            Err(e) => {
                let error_msg = e.to_string();
                if error_msg.contains(
                    "attempted to set a logger after the logging system was already initialized",
                ) || error_msg.contains("a global default trace dispatcher has already been set")
                {
                    tracing::debug!("日志系统已经初始化过了");
                    Ok(())
                } else {
                    Err(anyhow::anyhow!(
                        "tracing subscriber初始化失败: {}",
                        error_msg
                    ))
                }
            }
        }
    }

    /// 将 log::LevelFilter 转换为 tracing 的指令
    fn convert_level_to_directive(level: LevelFilter) -> tracing_subscriber::filter::Directive {
        use tracing_subscriber::filter::{Directive, LevelFilter as TracingLevel};
        match level {
            LevelFilter::Off => Directive::from(TracingLevel::OFF),
            LevelFilter::Error => Directive::from(tracing::Level::ERROR),
            LevelFilter::Warn => Directive::from(tracing::Level::WARN),
            LevelFilter::Info => Directive::from(tracing::Level::INFO),
            LevelFilter::Debug => Directive::from(tracing::Level::DEBUG),
            LevelFilter::Trace => Directive::from(tracing::Level::TRACE),
        }
    }

    /// 将 log::LevelFilter 转换为字符串
    fn level_to_string(level: LevelFilter) -> &'static str {
        match level {
            LevelFilter::Off => "off",
            LevelFilter::Error => "error",
            LevelFilter::Warn => "warn",
            LevelFilter::Info => "info",
            LevelFilter::Debug => "debug",
            LevelFilter::Trace => "trace",
        }
    }

    /// 检查日志系统是否已初始化
    pub fn is_initialized() -> bool {
        GLOBAL_LOGGING_STATE
            .get()
            .and_then(|state_mutex| state_mutex.lock().ok().map(|state| state.initialized))
            .unwrap_or(false)
    }

    /// 获取当前日志配置（如果已初始化）
    pub fn current_config() -> Option<LogConfig> {
        GLOBAL_LOGGING_STATE
            .get()
            .and_then(|state_mutex| state_mutex.lock().ok())
            .and_then(|state| state.current_config.clone())
    }

    /// 重置日志系统状态（主要用于测试）
    #[cfg(test)]
    pub fn reset_for_testing() {
        if let Some(state_mutex) = GLOBAL_LOGGING_STATE.get() {
            if let Ok(mut state) = state_mutex.lock() {
                state.initialized = false;
                state.init_result = Ok(());
                state.current_config = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::NamedTempFile;

    /// 创建测试用的日志配置
    fn create_test_config() -> LogConfig {
        LogConfig {
            level: LevelFilter::Info,
            file_path: None,
            console: true,
            json_format: false,
            module_levels: HashMap::new(),
        }
    }

    #[test]
    #[serial]
    fn test_logging_system_single_initialization() {
        LoggingSystem::reset_for_testing();

        let config = create_test_config();

        let result1 = LoggingSystem::setup_logging(config.clone());
        assert!(result1.is_ok());
        assert!(LoggingSystem::is_initialized());

        // 第二次初始化不会重复安装 subscriber
        let result2 = LoggingSystem::setup_logging(config);
        assert!(result2.is_ok());
    }

    #[test]
    #[serial]
    fn test_logging_system_force_reinit() {
        LoggingSystem::reset_for_testing();

        let config = create_test_config();
        let _system = LoggingSystem::setup_logging(config.clone()).unwrap();

        let result = LoggingSystem::setup_logging_with_options(config, true);
        assert!(result.is_ok());
    }

    #[test]
    #[serial]
    fn test_logging_system_with_file_output() {
        LoggingSystem::reset_for_testing();

        let temp_file = NamedTempFile::new().unwrap();
        let mut config = create_test_config();
        config.file_path = Some(temp_file.path().to_path_buf());
        config.console = false;

        assert!(LoggingSystem::setup_logging(config).is_ok());
    }

    #[test]
    #[serial]
    fn test_logging_system_with_json_and_module_levels() {
        LoggingSystem::reset_for_testing();

        let mut config = create_test_config();
        config.json_format = true;
        config
            .module_levels
            .insert("push_router::router".to_string(), LevelFilter::Debug);

        let system = LoggingSystem::setup_logging(config).unwrap();
        assert!(system.config().json_format);
    }

    #[test]
    #[serial]
    fn test_current_config_retrieval() {
        LoggingSystem::reset_for_testing();

        let config = create_test_config();
        let _system = LoggingSystem::setup_logging(config.clone()).unwrap();

        let retrieved_config = LoggingSystem::current_config().unwrap();
        assert_eq!(retrieved_config.level, config.level);
        assert_eq!(retrieved_config.console, config.console);
    }

    #[test]
    fn test_log_config_from_config() {
        let mut config = Config::default();
        config.router.log_level = "warn".to_string();
        config.logging.console = false;
        config.logging.json_format = true;
        config.logging.file_path = Some(PathBuf::from("/tmp/push-router.log"));
        config
            .logging
            .module_levels
            .insert("push_router::router".to_string(), "trace".to_string());

        let log_config = LogConfig::from_config(&config);

        assert_eq!(log_config.level, LevelFilter::Warn);
        assert!(!log_config.console);
        assert!(log_config.json_format);
        assert_eq!(
            log_config.file_path.as_deref(),
            Some(std::path::Path::new("/tmp/push-router.log"))
        );
        assert_eq!(
            log_config.module_levels.get("push_router::router"),
            Some(&LevelFilter::Trace)
        );
    }

    #[test]
    fn test_log_config_from_level_str() {
        assert_eq!(LogConfig::from_level_str("debug").level, LevelFilter::Debug);
        assert_eq!(LogConfig::from_level_str("error").level, LevelFilter::Error);
        assert_eq!(LogConfig::from_level_str("unknown").level, LevelFilter::Info);
    }
}
