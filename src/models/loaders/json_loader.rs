use crate::error::{AppResult, SourceError};
use crate::models::raw::RawQuestionRecord;
use serde_json::Value as JsonValue;

/// 把题目文件内容解析为原始记录列表
///
/// 顶层必须是数组，否则返回 [`SourceError::NotAnArray`]。
/// 数组中的单条记录不做校验，交给规范化阶段过滤。
pub fn parse_question_document(content: &str) -> AppResult<Vec<RawQuestionRecord>> {
    let document: JsonValue = serde_json::from_str(content)?;

    match document {
        JsonValue::Array(items) => Ok(items.into_iter().map(RawQuestionRecord::from_value).collect()),
        other => Err(SourceError::NotAnArray {
            found: json_type_name(&other),
        }
        .into()),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
