//! 公式片段扫描器
//!
//! 从左到右单遍扫描，不回溯。每个位置先检查 `$$` 再检查 `$`，
//! 避免把一个独立公式定界符误判为两个行内定界符。

use super::segment::{Segment, DISPLAY_DELIMITER, INLINE_DELIMITER};

/// 惰性片段序列
///
/// 纯函数式迭代器：不持有共享状态，可以对同一输入重复创建。
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Segments<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// 截取公式内容直到闭合定界符
    ///
    /// 找不到闭合定界符时，剩余输入全部作为公式内容。
    fn take_math(&mut self, body: &'a str, delimiter: &str) -> &'a str {
        match body.find(delimiter) {
            Some(end) => {
                self.rest = &body[end + delimiter.len()..];
                &body[..end]
            }
            None => {
                self.rest = "";
                body
            }
        }
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest;
        if rest.is_empty() {
            return None;
        }

        if let Some(body) = rest.strip_prefix(DISPLAY_DELIMITER) {
            let latex = self.take_math(body, DISPLAY_DELIMITER);
            return Some(Segment::DisplayMath(latex));
        }

        if let Some(body) = rest.strip_prefix(INLINE_DELIMITER) {
            let latex = self.take_math(body, INLINE_DELIMITER);
            return Some(Segment::InlineMath(latex));
        }

        // `$` 是 ASCII，按字节位置切分不会落在多字节字符中间
        let end = rest.find(INLINE_DELIMITER).unwrap_or(rest.len());
        self.rest = &rest[end..];
        Some(Segment::PlainText(&rest[..end]))
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Vec<Segment<'_>> {
        Segments::new(input).collect()
    }

    #[test]
    fn test_mixed_inline_and_display() {
        assert_eq!(
            scan("Solve $x+1=2$ then $$x=1$$ done"),
            vec![
                Segment::PlainText("Solve "),
                Segment::InlineMath("x+1=2"),
                Segment::PlainText(" then "),
                Segment::DisplayMath("x=1"),
                Segment::PlainText(" done"),
            ]
        );
    }

    #[test]
    fn test_double_dollar_takes_precedence() {
        assert_eq!(scan("$$a$$"), vec![Segment::DisplayMath("a")]);
    }

    #[test]
    fn test_unterminated_inline_consumes_rest() {
        // 未闭合时吞掉剩余全部输入
        assert_eq!(
            scan("text $unclosed"),
            vec![Segment::PlainText("text "), Segment::InlineMath("unclosed")]
        );
    }

    #[test]
    fn test_unterminated_display_consumes_rest() {
        assert_eq!(
            scan("see $$a + b"),
            vec![Segment::PlainText("see "), Segment::DisplayMath("a + b")]
        );
        // 单个 `$` 不能闭合独立公式
        assert_eq!(scan("$$a$"), vec![Segment::DisplayMath("a$")]);
    }

    #[test]
    fn test_single_dollar_inside_display_math() {
        assert_eq!(scan("$$a$b$$"), vec![Segment::DisplayMath("a$b")]);
    }

    #[test]
    fn test_adjacent_inline_segments() {
        // `$a$` 结束后紧跟 `$b$`，不会被当成 `$$`
        assert_eq!(
            scan("$a$$b$"),
            vec![Segment::InlineMath("a"), Segment::InlineMath("b")]
        );
    }

    #[test]
    fn test_empty_math_segments() {
        assert_eq!(scan("$$$$"), vec![Segment::DisplayMath("")]);
        assert_eq!(scan("$"), vec![Segment::InlineMath("")]);
        assert_eq!(scan("$$"), vec![Segment::DisplayMath("")]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_plain_text_is_single_segment() {
        assert_eq!(
            scan("no math here, just prose."),
            vec![Segment::PlainText("no math here, just prose.")]
        );
    }

    #[test]
    fn test_multibyte_text_around_math() {
        assert_eq!(
            scan("函数 $f(x)=x²$ 的导数"),
            vec![
                Segment::PlainText("函数 "),
                Segment::InlineMath("f(x)=x²"),
                Segment::PlainText(" 的导数"),
            ]
        );
    }

    #[test]
    fn test_iterator_is_restartable() {
        let input = "a $b$ c";
        let first: Vec<_> = Segments::new(input).collect();
        let second: Vec<_> = Segments::new(input).collect();
        assert_eq!(first, second);
    }
}
