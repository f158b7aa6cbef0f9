use serde::{Deserialize, Serialize};

/// 摘要中转文件内容：`{"summary": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryScratch {
    pub summary: String,
}

/// 大纲上传处理结果，用于渲染学习页
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyllabusOutcome {
    /// 学习页上显示的摘要或提示信息
    pub summary: String,
    /// 学习页上显示的主题
    pub current_topic: Option<String>,
    /// 需要写入会话的主题；摘要失败时也会保留
    pub session_topic: Option<String>,
}

impl SyllabusOutcome {
    /// 只有提示信息、没有主题的结果
    pub fn message(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// 摘要和主题都生成成功
    pub fn completed(summary: impl Into<String>, topic: impl Into<String>) -> Self {
        let topic = topic.into();
        Self {
            summary: summary.into(),
            current_topic: Some(topic.clone()),
            session_topic: Some(topic),
        }
    }
}
