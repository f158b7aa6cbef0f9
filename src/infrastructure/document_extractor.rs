//! 文档提取 - 基础设施层
//!
//! 把上传的大纲文件转换为纯文本：PDF 按页顺序拼接文本，其余按文本文件解码

use tracing::{debug, info};

use crate::error::{AppError, AppResult, ExtractionError};

/// 上传文档的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Text,
}

impl DocumentKind {
    /// 按文件名判断：只看 `.pdf` 后缀，区分大小写
    pub fn from_filename(filename: &str) -> Self {
        if filename.ends_with(".pdf") {
            DocumentKind::Pdf
        } else {
            DocumentKind::Text
        }
    }
}

/// 文档提取器
#[derive(Debug, Clone, Default)]
pub struct DocumentExtractor;

impl DocumentExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 提取上传文件的文本
    ///
    /// # 参数
    /// - `filename`: 上传时的文件名
    /// - `bytes`: 文件内容
    ///
    /// # 返回
    /// 返回文档文本；PDF 无法解析时返回 `ExtractionError`
    pub async fn extract(&self, filename: &str, bytes: Vec<u8>) -> AppResult<String> {
        let kind = DocumentKind::from_filename(filename);
        debug!("提取文档 {} ({:?}, {} 字节)", filename, kind, bytes.len());

        let text = match kind {
            DocumentKind::Pdf => self.extract_pdf(filename, bytes).await?,
            DocumentKind::Text => decode_text(&bytes),
        };

        info!("📄 文档提取完成: {} ({} 字符)", filename, text.chars().count());
        Ok(text)
    }

    /// PDF 解析是 CPU 密集的同步操作，放到阻塞线程池执行
    async fn extract_pdf(&self, filename: &str, bytes: Vec<u8>) -> AppResult<String> {
        let result = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::TaskFailed(e.to_string()))?;

        result.map_err(|e| AppError::pdf_failed(filename, e))
    }
}

/// 文本文件解码：先尝试 UTF-8，失败时按 ISO-8859-1 解码
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("不是合法的 UTF-8，按 ISO-8859-1 解码");
            bytes.iter().map(|&b| char::from(b)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("syllabus.pdf"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_filename("syllabus.txt"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_filename("syllabus.PDF"), DocumentKind::Text);
        assert_eq!(DocumentKind::from_filename(""), DocumentKind::Text);
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("Análisis I: límites".as_bytes()), "Análisis I: límites");
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // "café" 的 ISO-8859-1 编码
        assert_eq!(decode_text(&[0x63, 0x61, 0x66, 0xE9]), "café");
    }

    #[tokio::test]
    async fn test_text_upload_is_decoded() {
        let extractor = DocumentExtractor::new();
        let text = extractor
            .extract("notes.txt", b"Week 1: Vectors".to_vec())
            .await
            .unwrap();
        assert_eq!(text, "Week 1: Vectors");
    }

    #[tokio::test]
    async fn test_invalid_pdf_is_extraction_error() {
        let extractor = DocumentExtractor::new();
        let err = extractor
            .extract("broken.pdf", b"this is not a pdf".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
