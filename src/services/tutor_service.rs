//! 辅导服务 - 业务能力层
//!
//! 只负责"向 LLM 提问并整理回答"，不关心 HTTP、会话和降级文案
//!
//! 所有 LLM 输出先 trim，再交给 LaTeX 预处理；预处理后的结果不再改动

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::clients::{CompletionProvider, CompletionRequest};
use crate::error::{AppResult, LlmError};
use crate::latex::preprocess_latex;
use crate::models::quiz::DEFAULT_QUIZ_TOPIC;
use crate::models::{ChatReply, QuizQuestion};
use crate::services::diagram::{is_diagram_request, split_mermaid};
use crate::services::prompts;
use crate::services::quiz_parser::parse_quiz_response;
use crate::utils::truncate_text;

/// 辅导服务
///
/// 职责：
/// - 大纲主题提取、大纲摘要
/// - 对话回答（含图表）
/// - 出题、对话总结
///
/// 没有 LLM 客户端时每个方法都返回 `LlmError::ClientNotInitialized`
#[derive(Clone)]
pub struct TutorService {
    provider: Option<Arc<dyn CompletionProvider>>,
    max_syllabus_chars: usize,
}

impl TutorService {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, max_syllabus_chars: usize) -> Self {
        Self {
            provider,
            max_syllabus_chars,
        }
    }

    /// LLM 客户端是否可用
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// 发送请求并 trim 返回内容
    async fn ask(&self, request: CompletionRequest) -> AppResult<String> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(LlmError::ClientNotInitialized)?;
        let content = provider.complete(&request).await?;
        Ok(content.trim().to_string())
    }

    /// 从大纲中提取课程主题
    pub async fn extract_topic(&self, syllabus: &str) -> AppResult<String> {
        let syllabus = clip_chars(syllabus, self.max_syllabus_chars);
        let request = CompletionRequest::new(
            prompts::TOPIC_SYSTEM,
            prompts::topic_user(syllabus),
            prompts::TOPIC_MAX_TOKENS,
        );

        let topic = self.ask(request).await?;
        info!("📚 识别到课程主题: {}", topic);
        Ok(topic)
    }

    /// 生成大纲摘要
    pub async fn summarize_syllabus(&self, syllabus: &str) -> AppResult<String> {
        let syllabus = clip_chars(syllabus, self.max_syllabus_chars);
        let request = CompletionRequest::new(
            prompts::SYLLABUS_SUMMARY_SYSTEM,
            prompts::syllabus_summary_user(syllabus),
            prompts::SYLLABUS_SUMMARY_MAX_TOKENS,
        );

        let summary = self.ask(request).await?;
        debug!("大纲摘要 {} 字符", summary.chars().count());
        Ok(summary)
    }

    /// 回答一条对话消息
    ///
    /// # 参数
    /// - `user_message`: 学生输入
    ///
    /// # 返回
    /// 请求图表且回复里有 Mermaid 代码块时返回 `ChatReply::Diagram`，
    /// 否则返回经过 LaTeX 预处理的 `ChatReply::Text`
    pub async fn reply(&self, user_message: &str) -> AppResult<ChatReply> {
        debug!("收到消息: {}", truncate_text(user_message, 80));

        if is_diagram_request(user_message) {
            let request = CompletionRequest::new(
                prompts::DIAGRAM_SYSTEM,
                user_message,
                prompts::DIAGRAM_MAX_TOKENS,
            );
            let response = self.ask(request).await?;

            if let Some(mermaid) = split_mermaid(&response) {
                info!("📊 生成图表 ({} 字符)", mermaid.diagram.len());
                return Ok(ChatReply::Diagram {
                    response: mermaid.explanation,
                    diagram: mermaid.diagram,
                });
            }
            warn!("图表回复中没有 mermaid 代码块，改为普通回答");
        }

        let request = CompletionRequest::new(
            prompts::TUTOR_SYSTEM,
            user_message,
            prompts::TUTOR_MAX_TOKENS,
        )
        .with_temperature(prompts::CREATIVE_TEMPERATURE);
        let response = self.ask(request).await?;

        Ok(ChatReply::text(preprocess_latex(&response)))
    }

    /// 根据最近对话（或主题）生成一道单选题
    pub async fn generate_quiz(
        &self,
        topic: Option<&str>,
        conversation: &[String],
    ) -> AppResult<QuizQuestion> {
        let context = quiz_context(topic, conversation);
        let request = CompletionRequest::new(
            prompts::QUIZ_SYSTEM,
            prompts::quiz_user(&context),
            prompts::QUIZ_MAX_TOKENS,
        )
        .with_temperature(prompts::CREATIVE_TEMPERATURE);

        let raw = self.ask(request).await?;
        let quiz = parse_quiz_response(&raw)?;
        info!(
            "📝 生成测验题: {} ({} 个选项)",
            truncate_text(&quiz.question, 60),
            quiz.options.len()
        );
        Ok(quiz)
    }

    /// 总结最近的对话
    pub async fn summarize_conversation(
        &self,
        topic: &str,
        conversation: &[String],
    ) -> AppResult<String> {
        debug!("总结对话: 主题 {}, 共 {} 条", topic, conversation.len());

        let recent = last_n(conversation, prompts::SUMMARY_CONTEXT_MESSAGES).join(" ");
        let request = CompletionRequest::new(
            prompts::CONVERSATION_SUMMARY_SYSTEM,
            prompts::conversation_summary_user(topic, &recent),
            prompts::CONVERSATION_SUMMARY_MAX_TOKENS,
        )
        .with_temperature(prompts::CREATIVE_TEMPERATURE);

        let summary = self.ask(request).await?;
        Ok(preprocess_latex(&summary))
    }
}

/// 出题上下文：最近三条对话，没有对话时用主题
pub fn quiz_context(topic: Option<&str>, conversation: &[String]) -> String {
    if conversation.is_empty() {
        topic.unwrap_or(DEFAULT_QUIZ_TOPIC).to_string()
    } else {
        last_n(conversation, prompts::QUIZ_CONTEXT_MESSAGES).join("\n")
    }
}

fn last_n(items: &[String], n: usize) -> &[String] {
    &items[items.len().saturating_sub(n)..]
}

/// 按字符数截断，保证落在字符边界上
fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
