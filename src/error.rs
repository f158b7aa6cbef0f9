use async_openai::error::OpenAIError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 上传文档提取错误
    #[error("文档提取错误: {0}")]
    Extraction(#[from] ExtractionError),
    /// 测验题解析错误
    #[error("测验题解析错误: {0}")]
    QuizParse(#[from] QuizParseError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 模板渲染错误
    #[error("模板渲染错误: {0}")]
    Template(#[from] tera::Error),
    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 客户端未初始化（降级路径）
    #[error("LLM 客户端未初始化，请检查 API Key")]
    ClientNotInitialized,
    /// 构建请求失败
    #[error("构建 LLM 请求失败: {0}")]
    RequestBuildFailed(#[source] OpenAIError),
    /// API 调用失败（网络、鉴权、限流）
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: OpenAIError,
    },
    /// 调用超时
    #[error("LLM API调用超时 (模型: {model}, {secs}秒)")]
    Timeout { model: String, secs: u64 },
    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },
}

/// 文档提取错误
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// PDF 解析失败
    #[error("PDF 解析失败 ({filename}): {reason}")]
    PdfFailed { filename: String, reason: String },
    /// 提取任务异常退出
    #[error("PDF 提取任务异常: {0}")]
    TaskFailed(String),
    /// 读取上传内容失败
    #[error("读取上传文件失败: {0}")]
    UploadReadFailed(String),
}

/// 测验题解析错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizParseError {
    /// 返回内容为空
    #[error("测验题内容为空")]
    EmptyResponse,
    /// 没有 CORRECT: 行
    #[error("没有找到正确答案行 (CORRECT:)")]
    MissingCorrectLine,
    /// CORRECT: 后面没有字母
    #[error("正确答案行缺少选项字母")]
    MissingCorrectLetter,
    /// 答案字母超出选项范围
    #[error("正确答案 {letter} 超出选项范围 (共 {option_count} 个选项)")]
    AnswerOutOfRange { letter: char, option_count: usize },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 格式错误
    #[error("JSON 解析失败 ({path}): {source}")]
    JsonParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建PDF解析错误
    pub fn pdf_failed(filename: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AppError::Extraction(ExtractionError::PdfFailed {
            filename: filename.into(),
            reason: reason.to_string(),
        })
    }

    /// 是否为 LLM 客户端未初始化
    pub fn is_degraded(&self) -> bool {
        matches!(self, AppError::Llm(LlmError::ClientNotInitialized))
    }
}

impl From<OpenAIError> for LlmError {
    fn from(err: OpenAIError) -> Self {
        LlmError::RequestBuildFailed(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Extraction(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
            AppError::Llm(LlmError::ClientNotInitialized) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            AppError::Llm(_) => (StatusCode::BAD_GATEWAY, "language model unavailable".into()),
            _ => {
                tracing::error!("内部错误: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".into(),
                )
            }
        };
        (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
