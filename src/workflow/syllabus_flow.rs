//! 大纲上传流程 - 流程层
//!
//! 核心职责：定义"一次大纲上传"的完整处理流程
//!
//! 流程顺序：
//! 1. 检查 LLM 客户端
//! 2. 提取文档文本
//! 3. LLM 提取主题 → 写入会话
//! 4. LLM 生成摘要 → 写中转文件
//!
//! 任何一步失败都返回固定提示文字，不向上抛错

use tracing::{error, info, warn};

use crate::infrastructure::DocumentExtractor;
use crate::models::SyllabusOutcome;
use crate::services::{SummaryStore, TutorService};
use crate::utils::truncate_text;

pub const CLIENT_NOT_INITIALIZED: &str =
    "Error: language model client not properly initialized. Please check your API key.";
pub const PDF_UNREADABLE: &str =
    "Unable to read the PDF file. Please try again with a different file.";
pub const TOPIC_FAILED: &str =
    "Error communicating with the language model. Please check your API key and try again.";
pub const SUMMARY_FAILED: &str =
    "Unable to process syllabus at this time. Please check your API key and try again.";

/// 大纲上传流程
///
/// - 编排提取、主题、摘要三步
/// - 决定每一步失败时给学生看什么
/// - 只依赖业务能力（services）和基础设施
#[derive(Clone)]
pub struct SyllabusFlow {
    tutor: TutorService,
    extractor: DocumentExtractor,
    summaries: SummaryStore,
}

impl SyllabusFlow {
    pub fn new(tutor: TutorService, extractor: DocumentExtractor, summaries: SummaryStore) -> Self {
        Self {
            tutor,
            extractor,
            summaries,
        }
    }

    /// 处理一次上传
    ///
    /// # 参数
    /// - `filename`: 上传时的文件名（决定按 PDF 还是文本处理）
    /// - `bytes`: 文件内容
    ///
    /// # 返回
    /// 学习页要显示的内容；`session_topic` 非空时调用方需要写回会话
    pub async fn run(&self, filename: &str, bytes: Vec<u8>) -> SyllabusOutcome {
        info!("📤 收到大纲上传: {} ({} 字节)", filename, bytes.len());

        // ========== 步骤 1: 检查客户端 ==========
        if !self.tutor.is_available() {
            warn!("⚠️ LLM 客户端未初始化，跳过大纲处理");
            return SyllabusOutcome::message(CLIENT_NOT_INITIALIZED);
        }

        // ========== 步骤 2: 提取文本 ==========
        let text = match self.extractor.extract(filename, bytes).await {
            Ok(text) => text,
            Err(e) => {
                error!("❌ 文档提取失败: {}", e);
                return SyllabusOutcome::message(PDF_UNREADABLE);
            }
        };

        // ========== 步骤 3: 主题 ==========
        let topic = match self.tutor.extract_topic(&text).await {
            Ok(topic) => topic,
            Err(e) => {
                error!("❌ 主题提取失败: {}", e);
                return SyllabusOutcome::message(TOPIC_FAILED);
            }
        };

        // ========== 步骤 4: 摘要 ==========
        let summary = match self.tutor.summarize_syllabus(&text).await {
            Ok(summary) => summary,
            Err(e) => {
                error!("❌ 大纲摘要失败: {}", e);
                return SyllabusOutcome {
                    session_topic: Some(topic),
                    ..SyllabusOutcome::message(SUMMARY_FAILED)
                };
            }
        };

        // 中转文件只是给 /file_summary 用的，写失败不影响页面
        if let Err(e) = self.summaries.write(&summary).await {
            warn!("⚠️ 摘要文件写入失败: {}", e);
        }

        info!("✅ 大纲处理完成: {}", truncate_text(&summary, 60));
        SyllabusOutcome::completed(summary, topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::clients::{CompletionProvider, CompletionRequest};
    use crate::error::LlmError;

    struct Replies(Mutex<VecDeque<Result<String, LlmError>>>);

    #[async_trait]
    impl CompletionProvider for Replies {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::ClientNotInitialized))
        }
    }

    fn flow(
        replies: Option<Vec<Result<String, LlmError>>>,
        dir: &tempfile::TempDir,
    ) -> (SyllabusFlow, SummaryStore) {
        let provider = replies.map(|r| {
            Arc::new(Replies(Mutex::new(r.into()))) as Arc<dyn CompletionProvider>
        });
        let store = SummaryStore::new(dir.path().join("file_summary.json"));
        let flow = SyllabusFlow::new(
            TutorService::new(provider, 1000),
            DocumentExtractor::new(),
            store.clone(),
        );
        (flow, store)
    }

    fn failure() -> Result<String, LlmError> {
        Err(LlmError::EmptyContent { model: "m".into() })
    }

    #[tokio::test]
    async fn test_full_upload() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow(
            Some(vec![
                Ok("Convex Optimization".into()),
                Ok("You will learn duality. Which topic would you like to tackle first?".into()),
            ]),
            &dir,
        );

        let outcome = flow.run("syllabus.txt", b"Week 1: convex sets".to_vec()).await;

        assert_eq!(outcome.current_topic.as_deref(), Some("Convex Optimization"));
        assert_eq!(outcome.session_topic.as_deref(), Some("Convex Optimization"));
        assert!(outcome.summary.starts_with("You will learn duality."));
        let scratch = store.read().await.unwrap().unwrap();
        assert_eq!(scratch.summary, outcome.summary);
    }

    #[tokio::test]
    async fn test_without_client() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow(None, &dir);

        let outcome = flow.run("syllabus.txt", b"x".to_vec()).await;

        assert_eq!(outcome, SyllabusOutcome::message(CLIENT_NOT_INITIALIZED));
        assert!(store.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreadable_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _) = flow(Some(vec![]), &dir);

        let outcome = flow.run("syllabus.pdf", b"garbage".to_vec()).await;

        assert_eq!(outcome.summary, PDF_UNREADABLE);
        assert!(outcome.session_topic.is_none());
    }

    #[tokio::test]
    async fn test_topic_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, _) = flow(Some(vec![failure()]), &dir);

        let outcome = flow.run("syllabus.txt", b"x".to_vec()).await;

        assert_eq!(outcome, SyllabusOutcome::message(TOPIC_FAILED));
    }

    #[tokio::test]
    async fn test_summary_failure_keeps_session_topic() {
        let dir = tempfile::tempdir().unwrap();
        let (flow, store) = flow(Some(vec![Ok("Graph Theory".into()), failure()]), &dir);

        let outcome = flow.run("syllabus.txt", b"x".to_vec()).await;

        assert_eq!(outcome.summary, SUMMARY_FAILED);
        assert!(outcome.current_topic.is_none());
        assert_eq!(outcome.session_topic.as_deref(), Some("Graph Theory"));
        assert!(store.read().await.unwrap().is_none());
    }
}
