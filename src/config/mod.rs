use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Environment variable holding the completion service credential
pub const API_KEY_ENV: &str = "CEREBRAS_API_KEY";

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "magicui.toml";

/// 应用程序配置
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// LLM模型配置
    pub llm: LLMConfig,

    /// HTTP服务配置
    pub server: ServerConfig,

    /// Where previews and export archives are written
    pub output: OutputConfig,

    /// 是否启用详细日志
    pub verbose: bool,
}

/// LLM模型配置
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct LLMConfig {
    /// API key; an empty key switches the client into offline fallback mode
    pub api_key: String,

    /// Base URL of the chat-completion API
    pub api_base_url: String,

    pub model: String,

    /// Upper bound on generated tokens per completion
    pub max_tokens: u32,

    /// 温度
    pub temperature: f64,

    pub top_p: f64,

    /// 超时时间（秒）
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Root of the materialized previews, one sub-directory per preview id
    pub previews_dir: PathBuf,

    /// Directory receiving export archives
    pub exports_dir: PathBuf,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).context(format!("Failed to open config file: {:?}", path))?;
        let mut content = String::new();
        file.read_to_string(&mut content)
            .context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&content).context("Failed to parse config file")?;

        // A key in the environment wins over an empty file entry
        if config.llm.api_key.trim().is_empty() {
            config.llm.api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        }
        Ok(config)
    }

    /// Load `path` when given, otherwise `./magicui.toml` if present, otherwise defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        let default_config_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_CONFIG_FILE);

        if default_config_path.exists() {
            Self::from_file(&default_config_path)
        } else {
            Ok(Config::default())
        }
    }
}

impl LLMConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            api_base_url: String::from("https://api.cerebras.ai/v1"),
            model: String::from("llama-4-maverick-17b-128e-instruct"),
            max_tokens: 4096,
            temperature: 0.6,
            top_p: 0.9,
            timeout_seconds: 120,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 3000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            previews_dir: PathBuf::from("./public/previews"),
            exports_dir: PathBuf::from("./public/exports"),
        }
    }
}
