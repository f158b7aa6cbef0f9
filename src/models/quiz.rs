use serde::{Deserialize, Serialize};

/// 单选题最多允许的选项数（A-E）
pub const MAX_OPTIONS: usize = 5;

/// 默认测验主题
pub const DEFAULT_QUIZ_TOPIC: &str = "Foundations of Optimization";

/// 测验题
///
/// `correct_answer` 一定是 `options` 中的某一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

/// 测验题接口的返回体
///
/// 生成失败时带上 `error` 字段，题目本身仍是结构合法的兜底题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub quiz: QuizQuestion,
}

impl QuizResponse {
    pub fn success(quiz: QuizQuestion) -> Self {
        Self { error: None, quiz }
    }

    /// 生成失败时返回的固定题目
    pub fn fallback() -> Self {
        Self {
            error: Some("Unable to generate a quiz question.".to_string()),
            quiz: QuizQuestion {
                question: "An error occurred. Please try again.".to_string(),
                options: vec![
                    "Error occurred".to_string(),
                    "Please try again".to_string(),
                    "Contact support".to_string(),
                    "Refresh page".to_string(),
                    "Start over".to_string(),
                ],
                correct_answer: "Error occurred".to_string(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// 测验题请求体
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub conversation: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quiz_serializes_camel_case() {
        let response = QuizResponse::success(QuizQuestion {
            question: "What is 2+2?".into(),
            options: vec!["3".into(), "4".into()],
            correct_answer: "4".into(),
        });
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "question": "What is 2+2?",
                "options": ["3", "4"],
                "correctAnswer": "4"
            })
        );
    }

    #[test]
    fn test_fallback_is_structurally_valid() {
        let fallback = QuizResponse::fallback();
        assert!(fallback.is_fallback());
        assert_eq!(fallback.quiz.options.len(), MAX_OPTIONS);
        assert!(fallback.quiz.options.contains(&fallback.quiz.correct_answer));

        let value = serde_json::to_value(&fallback).unwrap();
        assert_eq!(value["error"], "Unable to generate a quiz question.");
        assert_eq!(value["correctAnswer"], "Error occurred");
    }

    #[test]
    fn test_quiz_request_defaults() {
        let request: QuizRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.topic.is_none());
        assert!(request.conversation.is_empty());
    }
}
