use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目数据源错误
    #[error("题目数据源错误: {0}")]
    Source(#[from] SourceError),
    /// 会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题目数据源相关错误
#[derive(Debug, Error)]
pub enum SourceError {
    /// 网络请求失败
    #[error("请求题目文件失败 ({location}): {source}")]
    FetchFailed {
        location: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务器返回非成功状态码
    #[error("请求题目文件失败 ({location}): HTTP {status}")]
    BadStatus { location: String, status: u16 },
    /// 读取本地文件失败
    #[error("读取题目文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {0}")]
    JsonParseFailed(#[from] serde_json::Error),
    /// 顶层不是数组
    #[error("题目文件顶层必须是数组，实际是 {found}")]
    NotAnArray { found: &'static str },
}

/// 会话错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 题库为空，无法开始会话
    #[error("没有可用的题目")]
    NoQuestionsAvailable,
}

/// 外部传入的会话状态不满足分页约束
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionStateError {
    /// 会话没有题目
    #[error("会话题量为 0")]
    Empty,
    /// 页大小与固定值不一致
    #[error("页大小必须为 {expected}，实际为 {found}")]
    PageSize { expected: usize, found: usize },
    /// 题目数量与会话题量不一致
    #[error("题目数量 {pool} 与会话题量 {total} 不一致")]
    PoolSize { pool: usize, total: usize },
    /// 当前位置超出会话范围
    #[error("当前位置越界: 第 {page_index} 页第 {local_index} 题，共 {total} 题")]
    OutOfRange {
        page_index: usize,
        local_index: usize,
        total: usize,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建网络请求失败错误
    pub fn fetch_failed(location: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Source(SourceError::FetchFailed {
            location: location.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Source(SourceError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Source(SourceError::JsonParseFailed(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
