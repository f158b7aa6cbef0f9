//! 文本片段类型
//!
//! 预处理器的输出单元：普通文本、行内公式、独立公式

use std::fmt;

/// 行内公式定界符
pub const INLINE_DELIMITER: &str = "$";
/// 独立公式定界符
pub const DISPLAY_DELIMITER: &str = "$$";

/// 一个分类后的文本片段
///
/// 片段直接借用输入字符串，不做任何拷贝。
/// 公式片段保存的是去掉定界符之后的内容。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// 普通文本（永远非空）
    PlainText(&'a str),
    /// 行内公式 `$...$`
    InlineMath(&'a str),
    /// 独立公式 `$$...$$`
    DisplayMath(&'a str),
}

impl<'a> Segment<'a> {
    /// 片段内容（公式片段不含定界符）
    pub fn content(&self) -> &'a str {
        match self {
            Segment::PlainText(text) | Segment::InlineMath(text) | Segment::DisplayMath(text) => {
                text
            }
        }
    }

    /// 是否为公式片段
    pub fn is_math(&self) -> bool {
        !matches!(self, Segment::PlainText(_))
    }

    /// 还原片段在原文中的定界形式
    ///
    /// 对于未闭合的公式，这里会补上闭合定界符，所以只有定界符成对出现时
    /// 拼接结果才与原文逐字节一致。
    pub fn delimited(&self) -> String {
        match self {
            Segment::PlainText(text) => (*text).to_string(),
            Segment::InlineMath(latex) => {
                format!("{INLINE_DELIMITER}{latex}{INLINE_DELIMITER}")
            }
            Segment::DisplayMath(latex) => {
                format!("{DISPLAY_DELIMITER}{latex}{DISPLAY_DELIMITER}")
            }
        }
    }

    /// 将片段渲染为带标记的 HTML 片段，追加到 `out`
    pub fn render_into(&self, out: &mut String) {
        match self {
            Segment::PlainText(text) => out.push_str(text),
            Segment::InlineMath(latex) => {
                out.push_str(r#"<span class="math-tex">$"#);
                out.push_str(latex);
                out.push_str("$</span>");
            }
            Segment::DisplayMath(latex) => {
                out.push_str(r#"<div class="math-tex">$$"#);
                out.push_str(latex);
                out.push_str("$$</div>");
            }
        }
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rendered = String::new();
        self.render_into(&mut rendered);
        f.write_str(&rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_inline_math() {
        assert_eq!(
            Segment::InlineMath("x^2").to_string(),
            r#"<span class="math-tex">$x^2$</span>"#
        );
    }

    #[test]
    fn test_render_display_math() {
        assert_eq!(
            Segment::DisplayMath(r"\frac{a}{b}").to_string(),
            r#"<div class="math-tex">$$\frac{a}{b}$$</div>"#
        );
    }

    #[test]
    fn test_plain_text_renders_verbatim() {
        let segment = Segment::PlainText("<b>bold</b> & more");
        assert_eq!(segment.to_string(), "<b>bold</b> & more");
        assert!(!segment.is_math());
    }

    #[test]
    fn test_delimited_restores_original_markers() {
        assert_eq!(Segment::InlineMath("a").delimited(), "$a$");
        assert_eq!(Segment::DisplayMath("a").delimited(), "$$a$$");
        assert_eq!(Segment::PlainText("a").delimited(), "a");
    }
}
