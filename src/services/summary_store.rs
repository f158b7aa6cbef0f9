//! 摘要中转文件 - 业务能力层
//!
//! 只负责读写 `{"summary": "..."}` 文件。
//! 每次上传成功都会截断重写，没有加锁，并发上传时后写入者生效。

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppResult, FileError};
use crate::models::SummaryScratch;

/// 摘要中转文件
#[derive(Debug, Clone)]
pub struct SummaryStore {
    path: PathBuf,
}

impl SummaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 覆盖写入摘要
    ///
    /// 父目录不存在时会自动创建
    pub async fn write(&self, summary: &str) -> AppResult<()> {
        let path = self.path.display().to_string();
        let body = serde_json::to_vec(&SummaryScratch {
            summary: summary.to_string(),
        })
        .map_err(|source| FileError::JsonParseFailed {
            path: path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FileError::WriteFailed {
                    path: parent.display().to_string(),
                    source,
                })?;
        }

        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| FileError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        debug!("摘要已写入 {} ({} 字符)", path, summary.chars().count());
        Ok(())
    }

    /// 读取当前摘要，文件不存在时返回 `None`
    pub async fn read(&self) -> AppResult<Option<SummaryScratch>> {
        let path = self.path.display().to_string();
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(FileError::ReadFailed { path, source }.into()),
        };

        let scratch = serde_json::from_slice(&content)
            .map_err(|source| FileError::JsonParseFailed { path, source })?;
        Ok(Some(scratch))
    }
}
