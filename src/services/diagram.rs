//! 图表请求识别与 Mermaid 代码提取

use std::sync::LazyLock;

use regex::Regex;

/// 触发图表生成的短语（不区分大小写）
const DIAGRAM_PHRASES: [&str; 8] = [
    "create a diagram",
    "show me a diagram",
    "make a flowchart",
    "create a flowchart",
    "draw a graph",
    "create a graph",
    "show the relationship",
    "visualize this",
];

/// 匹配 ```mermaid 代码块；没有闭合围栏时取到结尾
static MERMAID_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```mermaid(.*?)(?:```|\z)").expect("mermaid 正则合法"));

/// 拆分后的图表回复
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MermaidReply {
    /// 代码块之前的说明文字
    pub explanation: String,
    /// Mermaid 源码
    pub diagram: String,
}

/// 判断用户消息是否在请求图表
pub fn is_diagram_request(message: &str) -> bool {
    let lowered = message.to_lowercase();
    DIAGRAM_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

/// 从 LLM 回复中拆出说明文字和 Mermaid 代码
///
/// 没有 ```mermaid 代码块时返回 `None`
pub fn split_mermaid(response: &str) -> Option<MermaidReply> {
    let captures = MERMAID_BLOCK.captures(response)?;
    let whole = captures.get(0)?;
    let code = captures.get(1).map(|m| m.as_str()).unwrap_or_default();

    Some(MermaidReply {
        explanation: response[..whole.start()].trim().to_string(),
        diagram: code.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_phrases_case_insensitively() {
        assert!(is_diagram_request("Please CREATE A FLOWCHART of the simplex method"));
        assert!(is_diagram_request("can you visualize this?"));
        assert!(!is_diagram_request("What is a diagram?"));
        assert!(!is_diagram_request("explain gradient descent"));
    }

    #[test]
    fn test_split_mermaid_block() {
        let response = "Here is the process.\n```mermaid\ngraph TD\n  A-->B\n```\nHope it helps.";
        let reply = split_mermaid(response).unwrap();
        assert_eq!(reply.explanation, "Here is the process.");
        assert_eq!(reply.diagram, "graph TD\n  A-->B");
    }

    #[test]
    fn test_unclosed_block_takes_rest() {
        let reply = split_mermaid("Flow:\n```mermaid\nsequenceDiagram\n  A->>B: hi").unwrap();
        assert_eq!(reply.explanation, "Flow:");
        assert_eq!(reply.diagram, "sequenceDiagram\n  A->>B: hi");
    }

    #[test]
    fn test_no_block_returns_none() {
        assert!(split_mermaid("I can't draw that, but here is an explanation.").is_none());
        assert!(split_mermaid("```python\nprint(1)\n```").is_none());
    }
}
