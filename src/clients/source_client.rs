//! 题目数据源客户端
//!
//! 负责读取题目文件的原始内容：本地路径走 `tokio::fs`，
//! HTTP(S) 地址走 `reqwest`，并始终禁用缓存，保证每次加载都能拿到最新内容。

use crate::error::{AppError, AppResult, SourceError};
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::fmt;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// 题目文件位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    /// 本地文件
    File(PathBuf),
    /// 远程地址
    Url(String),
}

impl QuestionSource {
    /// 根据字符串判断数据源类型，`http://` 或 `https://` 开头视为远程地址
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            QuestionSource::Url(trimmed.to_string())
        } else {
            QuestionSource::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionSource::File(path) => write!(f, "{}", path.display()),
            QuestionSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// 题目数据源客户端
#[derive(Debug, Clone, Default)]
pub struct SourceClient {
    http: reqwest::Client,
}

impl SourceClient {
    /// 创建新的数据源客户端
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// 读取题目文件原始内容
    ///
    /// # 参数
    /// - `source`: 题目文件位置
    ///
    /// # 返回
    /// 返回文件文本内容；不做超时和重试
    pub async fn fetch(&self, source: &QuestionSource) -> AppResult<String> {
        debug!("读取题目文件: {}", source);
        match source {
            QuestionSource::File(path) => fs::read_to_string(path)
                .await
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e)),
            QuestionSource::Url(url) => self.fetch_url(url).await,
        }
    }

    async fn fetch_url(&self, url: &str) -> AppResult<String> {
        let response = self
            .http
            .get(url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|e| AppError::fetch_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::BadStatus {
                location: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        response
            .text()
            .await
            .map_err(|e| AppError::fetch_failed(url, e))
    }
}
