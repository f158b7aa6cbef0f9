use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError};

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 单次 LLM 调用超时（秒）
    pub llm_timeout_secs: u64,
    // --- 会话与文件 ---
    /// 会话 Cookie 签名密钥
    pub session_secret: String,
    /// 大纲摘要中转文件
    pub summary_file: String,
    /// 静态资源目录
    pub static_dir: String,
    /// 上传文件大小上限（字节）
    pub max_upload_bytes: usize,
    /// 发送给 LLM 的大纲文本最大字符数
    pub max_syllabus_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5000".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-3.5-turbo".to_string(),
            llm_timeout_secs: 60,
            session_secret: "temp_key".to_string(),
            summary_file: "static/file_summary.json".to_string(),
            static_dir: "static".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            max_syllabus_chars: 20_000,
        }
    }
}

impl Config {
    /// 只使用默认值和环境变量
    pub fn from_env() -> AppResult<Self> {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// 加载配置文件（如果提供），再叠加环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let base = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        base.with_overrides(|name| std::env::var(name).ok())
    }

    /// 从 TOML 文件读取配置，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    fn from_toml_str(content: &str, origin: &str) -> AppResult<Self> {
        let config = toml::from_str(content).map_err(|source| ConfigError::TomlParseFailed {
            path: origin.to_string(),
            source,
        })?;
        Ok(config)
    }

    /// 用查找函数提供的值覆盖配置
    ///
    /// # 参数
    /// - `lookup`: 按变量名返回值，通常是 `std::env::var`
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        if let Some(v) = lookup("BIND_ADDR") {
            self.bind_addr = v;
        }
        if let Some(v) = lookup("LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.llm_api_key = v;
        }
        if let Some(v) = lookup("LLM_API_BASE_URL") {
            self.llm_api_base_url = v;
        }
        if let Some(v) = lookup("LLM_MODEL_NAME") {
            self.llm_model_name = v;
        }
        if let Some(v) = lookup("SECRET_KEY") {
            self.session_secret = v;
        }
        if let Some(v) = lookup("SUMMARY_FILE") {
            self.summary_file = v;
        }
        if let Some(v) = lookup("STATIC_DIR") {
            self.static_dir = v;
        }
        self.llm_timeout_secs = parse_var(&lookup, "LLM_TIMEOUT_SECS", "u64", self.llm_timeout_secs)?;
        self.max_upload_bytes = parse_var(&lookup, "MAX_UPLOAD_BYTES", "usize", self.max_upload_bytes)?;
        self.max_syllabus_chars =
            parse_var(&lookup, "MAX_SYLLABUS_CHARS", "usize", self.max_syllabus_chars)?;
        self.verbose_logging = parse_var(&lookup, "VERBOSE_LOGGING", "bool", self.verbose_logging)?;
        Ok(self)
    }

    /// 是否配置了 LLM API Key
    pub fn has_llm_credentials(&self) -> bool {
        !self.llm_api_key.trim().is_empty()
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
    current: T,
) -> AppResult<T> {
    match lookup(var_name) {
        Some(value) => value.trim().parse().map_err(|_| {
            ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()
        }),
        None => Ok(current),
    }
}
