//! 题库 - 业务能力层
//!
//! 持有规范化后的全部题目。加载一次后只读，重新加载时整体替换。

use crate::clients::{QuestionSource, SourceClient};
use crate::error::AppResult;
use crate::models::loaders::parse_question_document;
use crate::models::question::Question;
use crate::services::normalizer::normalize_all;
use std::sync::Arc;
use tracing::{error, info};

/// 题库
#[derive(Debug, Clone, Default)]
pub struct QuestionRepository {
    questions: Arc<[Question]>,
}

impl QuestionRepository {
    /// 直接由题目列表构造
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into(),
        }
    }

    /// 空题库
    pub fn empty() -> Self {
        Self::default()
    }

    /// 解析题目文件内容并规范化
    ///
    /// 顶层不是数组或 JSON 无法解析时返回错误；题干为空的记录被丢弃。
    pub fn from_json_str(content: &str) -> AppResult<Self> {
        let records = parse_question_document(content)?;
        let questions = normalize_all(&records);

        let dropped = records.len() - questions.len();
        if dropped > 0 {
            info!("丢弃 {} 条没有题干的记录", dropped);
        }

        Ok(Self::new(questions))
    }

    /// 从数据源加载，失败时返回错误
    pub async fn try_load(client: &SourceClient, source: &QuestionSource) -> AppResult<Self> {
        let content = client.fetch(source).await?;
        Self::from_json_str(&content)
    }

    /// 从数据源加载
    ///
    /// 任何失败都只记录日志并返回空题库，调用方在开始会话时才会感知到。
    pub async fn load(client: &SourceClient, source: &QuestionSource) -> Self {
        match Self::try_load(client, source).await {
            Ok(repository) => {
                info!("✓ 从 {} 加载了 {} 道题目", source, repository.len());
                repository
            }
            Err(e) => {
                error!("❌ 加载题目失败 ({}): {}", source, e);
                Self::empty()
            }
        }
    }

    /// 全部题目（题库原始顺序）
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
