//! 静态资源服务
//!
//! 提供题目文件和页面资源，本身不包含答题逻辑。

pub mod router;

pub use router::create_router;

use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

/// 在指定端口启动服务，直到进程退出
pub async fn serve(port: u16, router: Router) -> Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法监听地址: {}", addr))?;

    info!("🌐 服务已启动: http://localhost:{}", port);
    axum::serve(listener, router)
        .await
        .context("服务异常退出")?;

    Ok(())
}
