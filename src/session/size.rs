use serde::{Deserialize, Serialize};
use std::fmt;

/// 未指定或无法解析时的默认题量
pub const DEFAULT_SESSION_SIZE: usize = 10;

/// 用户选择的题量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSize {
    /// 指定题数（超过题库数量时取题库数量）
    Count(usize),
    /// 全部题目
    All,
}

impl SessionSize {
    /// 解析下拉框的值：`"all"` 表示全部，其他按正整数解析，
    /// 解析失败或为 0 时使用 [`DEFAULT_SESSION_SIZE`]
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input == "all" {
            return SessionSize::All;
        }
        match input.parse::<usize>() {
            Ok(n) if n > 0 => SessionSize::Count(n),
            _ => SessionSize::Count(DEFAULT_SESSION_SIZE),
        }
    }

    /// 在给定题库规模下实际的题量
    ///
    /// `Count(0)` 可能绕过 [`SessionSize::parse`]（直接构造或反序列化），
    /// 与解析失败一样按 [`DEFAULT_SESSION_SIZE`] 处理。
    pub fn resolve(self, available: usize) -> usize {
        match self {
            SessionSize::All => available,
            SessionSize::Count(0) => DEFAULT_SESSION_SIZE.min(available),
            SessionSize::Count(n) => n.min(available),
        }
    }

    pub fn is_all(self) -> bool {
        matches!(self, SessionSize::All)
    }
}

impl Default for SessionSize {
    fn default() -> Self {
        SessionSize::Count(DEFAULT_SESSION_SIZE)
    }
}

impl From<usize> for SessionSize {
    fn from(n: usize) -> Self {
        if n == 0 {
            SessionSize::default()
        } else {
            SessionSize::Count(n)
        }
    }
}

impl fmt::Display for SessionSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionSize::All => write!(f, "all"),
            SessionSize::Count(n) => write!(f, "{}", n),
        }
    }
}
