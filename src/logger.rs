use tracing_subscriber::EnvFilter;

/// 默认日志过滤规则
const DEFAULT_FILTER: &str = "quiz_widget=info,tower_http=info";
const VERBOSE_FILTER: &str = "quiz_widget=debug,tower_http=debug";

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，未设置时按 `verbose` 选择默认级别。
/// 重复调用不会报错（测试中可能多次初始化）。
pub fn init(verbose: bool) {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
