//! 日志工具模块
//!
//! 提供启动和加载阶段的日志输出辅助函数

use crate::config::Config;
use tracing::{info, warn};

/// 记录程序启动信息
///
/// # 参数
/// - `config`: 程序配置
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 答题服务启动 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 静态资源目录: {}", config.static_root.display());
    info!("📄 题目文件: {}", config.questions_location());
    info!("🔌 端口: {}", config.port);
    info!("{}", "=".repeat(60));
}

/// 记录题目加载结果
///
/// # 参数
/// - `total`: 规范化后的题目数量
/// - `preview`: 第一道题的题干（用于确认加载的是哪份文件）
pub fn log_questions_loaded(total: usize, preview: Option<&str>) {
    if total == 0 {
        warn!("⚠️ 题库为空，用户开始答题时将看到提示");
        return;
    }

    info!("✓ 题库共 {} 道题", total);
    if let Some(text) = preview {
        info!("📝 第一题: {}", truncate_text(text, 60));
    }
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度（按字符计）
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("题目内容很长", 2), "题目...");
    }
}
