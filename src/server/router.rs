//! 静态资源路由
//!
//! - `/` 返回首页
//! - 其他路径按文件目录提供，找不到时尝试补上 `.html` 后缀
//! - 所有 `.json` 响应禁用缓存，题目文件修改后刷新即可生效

use axum::{
    extract::{Request, State},
    handler::Handler,
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::debug;

/// 路由共享状态
#[derive(Clone)]
pub struct StaticState {
    root: Arc<PathBuf>,
    index_file: Arc<str>,
}

/// 创建静态资源路由
///
/// # 参数
/// - `root`: 静态资源根目录
/// - `index_file`: 访问 `/` 时返回的文件名
pub fn create_router(root: impl Into<PathBuf>, index_file: &str) -> Router {
    let root = root.into();
    let state = StaticState {
        root: Arc::new(root.clone()),
        index_file: Arc::from(index_file),
    };

    let html_fallback = serve_with_html_extension.with_state(state.clone());

    Router::new()
        .route("/", get(serve_index))
        .fallback_service(ServeDir::new(root).fallback(html_fallback))
        .layer(middleware::from_fn(no_store_for_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_index(State(state): State<StaticState>) -> Response {
    let path = state.root.join(&*state.index_file);
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            debug!("首页不存在 ({}): {}", path.display(), e);
            not_found()
        }
    }
}

/// `/about` 找不到时尝试 `about.html`
async fn serve_with_html_extension(State(state): State<StaticState>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    if path.is_empty() || path.ends_with('/') || path.split('/').any(|segment| segment == "..") {
        return not_found();
    }

    let candidate = state.root.join(format!("{}.html", path));
    match tokio::fs::read_to_string(&candidate).await {
        Ok(html) => Html(html).into_response(),
        Err(_) => not_found(),
    }
}

async fn no_store_for_json(request: Request, next: Next) -> Response {
    let is_json = request.uri().path().ends_with(".json");
    let mut response = next.run(request).await;
    if is_json {
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }
    response
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
