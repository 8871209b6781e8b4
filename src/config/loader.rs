//! 配置加载器实现
//!
//! 提供TOML配置文件解析、环境变量替换和错误处理功能

use crate::config::types::{validate_config, Config};
use crate::error::{ConfigError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};

/// 默认配置文件名（当前目录）
pub const LOCAL_CONFIG_FILE: &str = "push-router.toml";

/// 配置加载器trait，定义配置加载接口
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    /// 从文件加载配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回
    /// * `Result<Config>` - 加载的配置或错误
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<Config>;

    /// 从字符串加载配置
    ///
    /// # 参数
    /// * `content` - 配置文件内容
    ///
    /// # 返回
    /// * `Result<Config>` - 加载的配置或错误
    async fn load_from_string(&self, content: &str) -> Result<Config>;

    /// 验证配置
    fn validate(&self, config: &Config) -> Result<()>;
}

/// TOML配置加载器实现
#[derive(Debug, Clone)]
pub struct TomlConfigLoader {
    /// 是否启用环境变量替换
    enable_env_substitution: bool,
}

impl TomlConfigLoader {
    /// 创建新的TOML配置加载器
    ///
    /// # 参数
    /// * `enable_env_substitution` - 是否启用环境变量替换
    pub fn new(enable_env_substitution: bool) -> Self {
        Self {
            enable_env_substitution,
        }
    }

    /// 替换字符串中的环境变量
    ///
    /// 以 `#` 开头的注释行不做替换
    ///
    /// # 参数
    /// * `content` - 要处理的字符串
    ///
    /// # 返回
    /// * `Result<String>` - 替换后的字符串或错误
    fn substitute_env_vars(&self, content: &str) -> Result<String> {
        if !self.enable_env_substitution {
            return Ok(content.to_string());
        }

        // 匹配 ${VAR_NAME} 格式的环境变量
        let env_var_regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| ConfigError::ParseError(format!("正则表达式错误: {}", e)))?;

        let mut result = String::with_capacity(content.len());

        for line in content.split_inclusive('\n') {
            // 注释行原样保留
            if line.trim_start().starts_with('#') {
                result.push_str(line);
                continue;
            }

            let mut substituted = line.to_string();
            for captures in env_var_regex.captures_iter(line) {
                let full_match = &captures[0];
                let var_name = &captures[1];

                match std::env::var(var_name) {
                    Ok(value) => {
                        substituted = substituted.replace(full_match, &value);
                    }
                    Err(_) => {
                        return Err(ConfigError::EnvVarError {
                            var: var_name.to_string(),
                        }
                        .into());
                    }
                }
            }
            result.push_str(&substituted);
        }

        Ok(result)
    }

    /// 解析TOML内容
    fn parse_toml(&self, content: &str) -> Result<Config> {
        let processed_content = self.substitute_env_vars(content)?;

        let config: Config = toml::from_str(&processed_content)
            .map_err(|e| ConfigError::ParseError(format!("TOML解析失败: {}", e)))?;

        Ok(config)
    }
}

impl Default for TomlConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl ConfigLoader for TomlConfigLoader {
    async fn load_from_file<P: AsRef<Path> + Send>(&self, path: P) -> Result<Config> {
        let path = path.as_ref();

        // 检查文件是否存在
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ParseError(format!("读取文件失败: {}", e)))?;

        let config = self.parse_toml(&content)?;
        self.validate(&config)?;

        log::info!("成功加载配置文件: {}", path.display());
        log::debug!("配置内容: {:?}", config);

        Ok(config)
    }

    async fn load_from_string(&self, content: &str) -> Result<Config> {
        let config = self.parse_toml(content)?;
        self.validate(&config)?;

        log::debug!("成功解析配置字符串");

        Ok(config)
    }

    fn validate(&self, config: &Config) -> Result<()> {
        validate_config(config).map_err(|e| ConfigError::ValidationError(e).into())
    }
}

/// 获取默认配置文件路径
///
/// 优先使用当前目录下的 push-router.toml，否则使用用户配置目录
pub fn get_default_config_path() -> PathBuf {
    if Path::new(LOCAL_CONFIG_FILE).exists() {
        return PathBuf::from(LOCAL_CONFIG_FILE);
    }

    dirs::config_dir()
        .map(|config_dir| config_dir.join("push-router").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TEST_CONFIG_TOML: &str = r##"
[router]
max_concurrent_handlers = 4
log_level = "debug"

[presentation]
accent_color = "#112233"

[navigation]
scheme = "myapp"

[registration]
endpoint = "https://push.example.com/devices"
device_token = "token-abc"
platform = "apns"
"##;

    const TEST_CONFIG_WITH_ENV_VARS: &str = r#"
[registration]
endpoint = "${PUSH_ROUTER_TEST_ENDPOINT}"
device_token = "${PUSH_ROUTER_TEST_TOKEN}"
"#;

    #[tokio::test]
    async fn test_toml_parsing() {
        let loader = TomlConfigLoader::new(false);
        let config = loader.load_from_string(TEST_CONFIG_TOML).await.unwrap();

        assert_eq!(config.router.max_concurrent_handlers, 4);
        assert_eq!(config.router.log_level, "debug");
        assert_eq!(config.presentation.accent_color, "#112233");
        assert_eq!(config.navigation.scheme, "myapp");
        assert_eq!(config.registration.device_token.as_deref(), Some("token-abc"));
        assert_eq!(config.registration.platform, "apns");
        // 未配置的字段使用默认值
        assert_eq!(config.image.request_timeout_seconds, 10);
    }

    #[tokio::test]
    #[serial]
    async fn test_env_var_substitution() {
        env::set_var("PUSH_ROUTER_TEST_ENDPOINT", "https://test.push.example.com");
        env::set_var("PUSH_ROUTER_TEST_TOKEN", "test-token-123");

        let loader = TomlConfigLoader::new(true);
        let config = loader
            .load_from_string(TEST_CONFIG_WITH_ENV_VARS)
            .await
            .unwrap();

        assert_eq!(
            config.registration.endpoint.as_deref(),
            Some("https://test.push.example.com")
        );
        assert_eq!(
            config.registration.device_token.as_deref(),
            Some("test-token-123")
        );

        env::remove_var("PUSH_ROUTER_TEST_ENDPOINT");
        env::remove_var("PUSH_ROUTER_TEST_TOKEN");
    }

    #[tokio::test]
    #[serial]
    async fn test_env_var_substitution_missing_var() {
        let config_with_missing_var = r#"
[registration]
device_token = "${PUSH_ROUTER_MISSING_VAR}"
"#;

        let loader = TomlConfigLoader::new(true);
        let result = loader.load_from_string(config_with_missing_var).await;

        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("PUSH_ROUTER_MISSING_VAR"));
        }
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let loader = TomlConfigLoader::new(false);
        let result = loader
            .load_from_string("[router]\nmax_concurrent_handlers = 0\n")
            .await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("配置验证失败"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TEST_CONFIG_TOML.as_bytes()).unwrap();

        let loader = TomlConfigLoader::new(false);
        let config = loader.load_from_file(file.path()).await.unwrap();

        assert_eq!(config.router.max_concurrent_handlers, 4);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let loader = TomlConfigLoader::new(false);
        let result = loader.load_from_file("/nonexistent/push-router.toml").await;

        assert!(result.unwrap_err().to_string().contains("配置文件不存在"));
    }

    #[tokio::test]
    #[serial]
    async fn test_comment_lines_are_not_substituted() {
        env::remove_var("PUSH_ROUTER_UNSET_IN_COMMENT");
        env::set_var("PUSH_ROUTER_TEST_SCHEME", "myapp");

        let content = r#"
# 注释中的 ${PUSH_ROUTER_UNSET_IN_COMMENT} 不会被替换
[navigation]
  # ${PUSH_ROUTER_UNSET_IN_COMMENT}
scheme = "${PUSH_ROUTER_TEST_SCHEME}"
"#;
        let loader = TomlConfigLoader::new(true);
        let config = loader.load_from_string(content).await.unwrap();

        assert_eq!(config.navigation.scheme, "myapp");

        env::remove_var("PUSH_ROUTER_TEST_SCHEME");
    }

    #[test]
    fn test_substitute_env_vars_disabled() {
        let loader = TomlConfigLoader::new(false);
        let content = "test ${VAR} content";
        let result = loader.substitute_env_vars(content).unwrap();
        assert_eq!(result, content);
    }

    #[test]
    fn test_get_default_config_path() {
        let path = get_default_config_path();
        let path = path.to_string_lossy();
        assert!(path.contains("push-router"));
        assert!(path.ends_with(".toml"));
    }
}
