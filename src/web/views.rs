//! 页面渲染
//!
//! 模板在编译期嵌入二进制，启动时解析一次

use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};

use crate::error::AppResult;
use crate::models::SessionState;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("study.html", include_str!("../../templates/study.html")),
    ("progress.html", include_str!("../../templates/progress.html")),
];

/// 进度页上的一行答题记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub question: String,
    pub selected_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl HistoryRow {
    /// 前端提交的记录结构不固定，缺失字段按空值处理
    pub fn from_record(record: &JsonValue) -> Self {
        let text = |key: &str| {
            record
                .get(key)
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            question: text("question"),
            selected_answer: text("selected_answer"),
            correct_answer: text("correct_answer"),
            is_correct: record
                .get("is_correct")
                .and_then(JsonValue::as_bool)
                .unwrap_or(false),
        }
    }
}

/// 页面模板
#[derive(Clone)]
pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn render_index(&self) -> AppResult<String> {
        Ok(self.tera.render("index.html", &Context::new())?)
    }

    /// 学习页
    ///
    /// # 参数
    /// - `summary`: 大纲摘要或提示信息（直接访问 /study 时没有）
    /// - `current_topic`: 页面标题上的主题
    pub fn render_study(&self, summary: Option<&str>, current_topic: Option<&str>) -> AppResult<String> {
        let mut context = Context::new();
        context.insert("summary", summary.unwrap_or_default());
        context.insert("current_topic", current_topic.unwrap_or_default());
        Ok(self.tera.render("study.html", &context)?)
    }

    /// 进度页：主题、得分、答题记录
    pub fn render_progress(&self, session: &SessionState) -> AppResult<String> {
        let history: Vec<HistoryRow> = session
            .quiz_history
            .iter()
            .map(HistoryRow::from_record)
            .collect();

        let mut context = Context::new();
        context.insert("current_topic", session.topic_or_default());
        context.insert("score", &session.score());
        context.insert("quiz_history", &history);
        Ok(self.tera.render("progress.html", &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_templates_parse() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_index_has_upload_form() {
        let html = Views::new().unwrap().render_index().unwrap();
        assert!(html.contains(r#"action="/upload_syllabus""#));
        assert!(html.contains(r#"name="file""#));
    }

    #[test]
    fn test_study_escapes_summary() {
        let html = Views::new()
            .unwrap()
            .render_study(Some("<b>Limits</b>"), Some("Calculus I"))
            .unwrap();
        assert!(html.contains("Calculus I"));
        assert!(html.contains("&lt;b&gt;Limits&lt;&#x2F;b&gt;"));
    }

    #[test]
    fn test_study_without_summary() {
        let html = Views::new().unwrap().render_study(None, Some("No topic selected")).unwrap();
        assert!(html.contains("No topic selected"));
        assert!(!html.contains("syllabus-summary"));
    }

    #[test]
    fn test_progress_page() {
        let session = SessionState {
            current_topic: Some("Probability".into()),
            correct_answers: 1,
            total_questions: 2,
            quiz_history: vec![
                json!({"question": "P(A)?", "selected_answer": "0.5", "correct_answer": "0.5", "is_correct": true}),
                json!({"unexpected": 1}),
            ],
        };

        let html = Views::new().unwrap().render_progress(&session).unwrap();

        assert!(html.contains("Probability"));
        assert!(html.contains("1/2"));
        assert!(html.contains("P(A)?"));
        assert!(html.contains("wrong"));
    }

    #[test]
    fn test_history_row_tolerates_missing_fields() {
        assert_eq!(HistoryRow::from_record(&json!("not an object")), HistoryRow::default());
    }
}
