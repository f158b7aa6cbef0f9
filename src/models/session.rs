use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 未设置主题时显示的文字
pub const NO_TOPIC: &str = "No topic selected";

/// 单个浏览器会话的状态
///
/// 只保存在签名 Cookie 中，服务端不持久化
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_topic: Option<String>,
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub total_questions: u32,
    /// 前端提交的答题记录，服务端不解析其结构
    #[serde(default)]
    pub quiz_history: Vec<JsonValue>,
}

impl SessionState {
    /// 当前主题，未设置时返回占位文字
    pub fn topic_or_default(&self) -> &str {
        self.current_topic.as_deref().unwrap_or(NO_TOPIC)
    }

    /// 形如 `3/5` 的得分
    pub fn score(&self) -> String {
        format!("{}/{}", self.correct_answers, self.total_questions)
    }

    /// 用前端同步的数据覆盖测验状态
    pub fn apply_sync(&mut self, sync: QuizSync) {
        self.correct_answers = sync.correct_answers;
        self.total_questions = sync.total_questions;
        self.quiz_history = sync.quiz_history;
    }
}

/// 测验状态同步请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizSync {
    #[serde(default)]
    pub correct_answers: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub quiz_history: Vec<JsonValue>,
}
