use serde::{Deserialize, Serialize};

/// 对话请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub user_message: String,
}

/// 对话回复
///
/// 序列化后带 `type` 字段，前端据此决定是否渲染 Mermaid 图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChatReply {
    /// 普通文本（已完成 LaTeX 预处理）
    Text { response: String },
    /// 图表：说明文字 + Mermaid 源码
    Diagram { response: String, diagram: String },
}

impl ChatReply {
    pub fn text(response: impl Into<String>) -> Self {
        ChatReply::Text {
            response: response.into(),
        }
    }
}

/// 对话总结请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRequest {
    #[serde(default)]
    pub conversation: Vec<String>,
    #[serde(default)]
    pub topic: String,
}

/// 对话总结返回体
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_reply_shape() {
        assert_eq!(
            serde_json::to_value(ChatReply::text("hi")).unwrap(),
            json!({"type": "text", "response": "hi"})
        );
    }

    #[test]
    fn test_diagram_reply_shape() {
        let reply = ChatReply::Diagram {
            response: "A simple flow.".into(),
            diagram: "graph TD; A-->B".into(),
        };
        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            json!({"type": "diagram", "response": "A simple flow.", "diagram": "graph TD; A-->B"})
        );
    }
}
