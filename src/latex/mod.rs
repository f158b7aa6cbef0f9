//! LaTeX 预处理模块
//!
//! 把混合了文本和公式的字符串切分成片段，再用统一的标记重新输出：
//!
//! - 普通文本原样输出
//! - 行内公式 `$...$` → `<span class="math-tex">$...$</span>`
//! - 独立公式 `$$...$$` → `<div class="math-tex">$$...$$</div>`
//!
//! ## 已知限制
//! - 未闭合的 `$` / `$$` 会把剩余输入全部当作公式内容
//! - 不支持在公式内转义 `$`
//!
//! 整个模块是纯函数，没有共享可变状态，可以在多个请求中并发调用。

pub mod scanner;
pub mod segment;

pub use scanner::Segments;
pub use segment::Segment;

/// 按输入顺序惰性产出片段
pub fn segments(input: &str) -> Segments<'_> {
    Segments::new(input)
}

/// 预处理 LaTeX 文本，返回带标记的字符串
///
/// # 参数
/// - `text`: 原始文本（调用方负责去掉首尾空白）
///
/// # 返回
/// 返回重新标记后的文本，调用方不应再次扫描或修改
pub fn preprocess_latex(text: &str) -> String {
    let mut processed = String::with_capacity(text.len() + text.len() / 4);
    for segment in segments(text) {
        segment.render_into(&mut processed);
    }
    processed
}

/// 用原始定界符重新拼接片段
pub fn reconstruct<'a>(segments: impl IntoIterator<Item = Segment<'a>>) -> String {
    segments.into_iter().map(|segment| segment.delimited()).collect()
}
