//! # Syllabus Tutor
//!
//! 上传课程大纲后，借助 LLM 进行对话辅导、出题和总结的 Web 应用
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 与外部格式打交道，不做业务判断
//! - `DocumentExtractor` - PDF / 纯文本提取
//! - `clients/` - `CompletionProvider` 抽象和基于 async-openai 的 `LlmClient`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个模块一种能力
//! - `TutorService` - 主题、摘要、对话、出题、总结
//! - `quiz_parser` - 从 LLM 文本中解析单选题
//! - `diagram` - 图表请求识别与 Mermaid 提取
//! - `SummaryStore` - 摘要中转文件
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次大纲上传"的完整处理流程
//! - `SyllabusFlow` - 提取 → 主题 → 摘要 → 写文件，以及每一步的兜底
//!
//! ### ④ Web 层与编排层
//! - `web/` - 路由、处理函数、签名会话 Cookie、页面模板
//! - `app` - 组装共享状态、启动服务、优雅退出
//!
//! ### 叶子模块
//! - `latex` - 把 `$...$` / `$$...$$` 包装成前端可渲染的标记
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod latex;
pub mod models;
pub mod services;
pub mod utils;
pub mod web;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{CompletionProvider, CompletionRequest, LlmClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use latex::preprocess_latex;
pub use web::{router, AppState, SharedState};
