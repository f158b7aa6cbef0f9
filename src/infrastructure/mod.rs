//! 基础设施层
//!
//! 持有与外部格式打交道的能力，不包含业务判断

pub mod document_extractor;

pub use document_extractor::{DocumentExtractor, DocumentKind};
