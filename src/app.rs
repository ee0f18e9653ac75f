//! 应用入口
//!
//! 二进制程序只负责提供静态资源（页面、脚本和题目文件）。答题流程
//! （[`crate::workflow::QuizFlow`]、`Command`、`RenderInstruction`）是库接口，
//! 由展示层在自己的事件循环中调用，这里不对外提供答题接口。

use crate::clients::{QuestionSource, SourceClient};
use crate::config::Config;
use crate::server;
use crate::services::QuestionRepository;
use crate::utils::logging::{log_questions_loaded, log_startup};
use anyhow::Result;
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    ///
    /// 启动时先加载一遍题目文件，只为在日志里尽早暴露数据问题，
    /// 加载结果不会保留；加载失败也不会阻止服务启动。
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = SourceClient::new();
        let source = QuestionSource::parse(&config.questions_location());
        let repository = QuestionRepository::load(&client, &source).await;

        log_questions_loaded(
            repository.len(),
            repository.questions().first().map(|q| q.question_text.as_str()),
        );

        Ok(Self { config })
    }

    /// 运行静态资源服务
    pub async fn run(self) -> Result<()> {
        let router = server::create_router(&self.config.static_root, &self.config.index_file);
        info!("📦 提供静态资源: {}", self.config.static_root.display());
        server::serve(self.config.port, router).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[tokio::test]
    async fn test_initialize_survives_missing_questions() {
        let config = Config {
            static_root: PathBuf::from("no/such/root"),
            ..Config::default()
        };
        assert!(App::initialize(config).await.is_ok());
    }
}
