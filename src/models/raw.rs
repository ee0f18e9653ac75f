//! 原始题目记录
//!
//! 题目文件的字段写法五花八门：题干可能叫 `question` 也可能叫 `prompt`，
//! 选项可能是数组也可能是 `{ "a": "...", "b": "..." }`，答案可能放在
//! `answer` / `correct_answers` / `correct_answer` 任意一个字段里。
//! 这里只做宽松的反序列化，不做任何判断。

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

/// 答案字段，按优先级排列
pub const ANSWER_FIELDS: [&str; 3] = ["answer", "correct_answers", "correct_answer"];

/// 题目文件中的一条原始记录
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestionRecord {
    #[serde(default)]
    pub question: Option<JsonValue>,
    #[serde(default)]
    pub prompt: Option<JsonValue>,
    #[serde(default)]
    pub explanation: Option<JsonValue>,
    #[serde(default)]
    pub options: Option<JsonValue>,
    #[serde(default)]
    pub answer: Option<JsonValue>,
    #[serde(default)]
    pub correct_answers: Option<JsonValue>,
    #[serde(default)]
    pub correct_answer: Option<JsonValue>,
}

/// 选项的两种原始写法
#[derive(Debug, Clone, Copy)]
pub enum RawOptions<'a> {
    /// 有序数组
    List(&'a [JsonValue]),
    /// 以字母/键名为 key 的对象
    Keyed(&'a Map<String, JsonValue>),
    /// 缺失或无法识别
    Absent,
}

impl RawQuestionRecord {
    /// 从任意 JSON 值构造记录，非对象一律视为空记录
    pub fn from_value(value: JsonValue) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }

    /// 题干：`question` 优先，其次 `prompt`，都没有则为空串
    pub fn question_text(&self) -> String {
        [&self.question, &self.prompt]
            .into_iter()
            .flatten()
            .find(|v| is_truthy(v))
            .map(value_to_text)
            .unwrap_or_default()
    }

    /// 解析说明，缺失时为空串
    pub fn explanation_text(&self) -> String {
        self.explanation
            .as_ref()
            .filter(|v| is_truthy(v))
            .map(value_to_text)
            .unwrap_or_default()
    }

    /// 按 [`ANSWER_FIELDS`] 的顺序取第一个非 null 的答案字段
    pub fn answer_value(&self) -> Option<&JsonValue> {
        ANSWER_FIELDS
            .iter()
            .find_map(|name| self.answer_field(name))
    }

    fn answer_field(&self, name: &str) -> Option<&JsonValue> {
        let field = match name {
            "answer" => &self.answer,
            "correct_answers" => &self.correct_answers,
            "correct_answer" => &self.correct_answer,
            _ => return None,
        };
        field.as_ref().filter(|v| !v.is_null())
    }

    /// 选项的原始形态
    pub fn raw_options(&self) -> RawOptions<'_> {
        match &self.options {
            Some(JsonValue::Array(items)) => RawOptions::List(items),
            Some(JsonValue::Object(map)) => RawOptions::Keyed(map),
            _ => RawOptions::Absent,
        }
    }
}

/// 把任意 JSON 标量转成展示文本
///
/// 整数值的浮点数按整数输出（`3.0` → `"3"`），数组和对象输出紧凑 JSON。
pub fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or_default();
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    f.to_string()
                }
            }
        }
        other => other.to_string(),
    }
}

/// 空串、0、false、null 视为"没有值"
fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(_) | JsonValue::Object(_) => true,
    }
}
