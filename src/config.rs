use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 配置文件默认路径
pub const DEFAULT_CONFIG_FILE: &str = "quiz.toml";

/// 程序配置
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// 静态服务端口
    pub port: u16,
    /// 静态资源根目录
    pub static_root: PathBuf,
    /// 访问 `/` 时返回的页面
    pub index_file: String,
    /// 题目文件位置（相对路径按静态根目录解析，也可以是 http(s) 地址）
    pub questions_source: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            static_root: PathBuf::from("."),
            index_file: "index.html".to_string(),
            questions_source: "questions.json".to_string(),
            verbose_logging: false,
        }
    }
}

/// 配置文件内容，所有字段可选
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    port: Option<u16>,
    static_root: Option<PathBuf>,
    index_file: Option<String>,
    questions_source: Option<String>,
    verbose_logging: Option<bool>,
}

impl Config {
    /// 仅从环境变量读取，无法解析的值使用默认值
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取配置文件（`QUIZ_CONFIG` 指定，默认 `quiz.toml`，不存在则跳过），
    /// 再用环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("QUIZ_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let path = Path::new(&path);

        let base = if path.exists() {
            Self::from_toml_file(path)?
        } else {
            Self::default()
        };

        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取，未写的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content).map_err(|e| {
            ConfigError::TomlParseFailed {
                path: path.display().to_string(),
                source: e,
            }
            .into()
        })
    }

    fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(content)?;
        let default = Self::default();
        Ok(Self {
            port: file.port.unwrap_or(default.port),
            static_root: file.static_root.unwrap_or(default.static_root),
            index_file: file.index_file.unwrap_or(default.index_file),
            questions_source: file.questions_source.unwrap_or(default.questions_source),
            verbose_logging: file.verbose_logging.unwrap_or(default.verbose_logging),
        })
    }

    fn with_env_overrides(self) -> Self {
        Self {
            port: std::env::var("PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.port),
            static_root: std::env::var("STATIC_ROOT").map(PathBuf::from).unwrap_or(self.static_root),
            index_file: std::env::var("INDEX_FILE").unwrap_or(self.index_file),
            questions_source: std::env::var("QUESTIONS_SOURCE").unwrap_or(self.questions_source),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 题目文件的实际位置：远程地址原样返回，相对路径拼接到静态根目录下
    pub fn questions_location(&self) -> String {
        let source = self.questions_source.trim();
        if source.starts_with("http://") || source.starts_with("https://") || Path::new(source).is_absolute() {
            source.to_string()
        } else {
            self.static_root.join(source).display().to_string()
        }
    }
}
