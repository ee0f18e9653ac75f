//! 题目规范化服务 - 业务能力层
//!
//! 把一条原始记录转换成统一的 [`Question`]：
//! 1. 提取题干、解析和答案
//! 2. 构建选项列表（数组写法 / 键值写法）
//! 3. 逐个答案 token 判断对应哪个选项：字母 → 键名 → 选项原文
//! 4. 根据正确选项数量确定题型

use crate::models::question::{AnswerOption, OptionId, Question, QuestionKind};
use crate::models::raw::{value_to_text, RawOptions, RawQuestionRecord};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::debug;

/// 匹配 "a. " / "A) " / "(b): " / "c- " 这类序号前缀
const ENUMERATION_PREFIX: &str = r"^\s*\(?[a-zA-Z]\)?[.):\-]\s+";

fn enumeration_prefix() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ENUMERATION_PREFIX).ok()).as_ref()
}

/// 去掉选项文本开头的序号前缀，并去除首尾空白
///
/// 只有完整匹配前缀模式时才会删除，例如 `"a. Paris"` → `"Paris"`，
/// 而 `"a.Paris"`（分隔符后没有空白）保持不变。
pub fn strip_enumeration_prefix(text: &str) -> String {
    match enumeration_prefix() {
        Some(re) => re.replace(text, "").trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// 把答案字段规范化为 token 列表
///
/// - 缺失 → 空列表
/// - 数组 → 每个元素转字符串后去空白
/// - 标量 → 单元素列表
pub fn normalize_answers(raw_answer: Option<&JsonValue>) -> Vec<String> {
    match raw_answer {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| value_to_text(item).trim().to_string())
            .collect(),
        Some(number @ JsonValue::Number(_)) => vec![value_to_text(number)],
        Some(other) => vec![value_to_text(other).trim().to_string()],
    }
}

/// 构建好的选项列表
#[derive(Debug, Default)]
struct OptionList {
    texts: Vec<String>,
    /// 键值写法时按大小写无关顺序排好的键名；数组写法时为空
    sorted_keys: Vec<String>,
}

fn build_option_list(options: RawOptions<'_>) -> OptionList {
    match options {
        RawOptions::List(items) => OptionList {
            texts: items
                .iter()
                .map(|item| match item {
                    JsonValue::String(s) => strip_enumeration_prefix(s),
                    other => value_to_text(other),
                })
                .collect(),
            sorted_keys: Vec::new(),
        },
        RawOptions::Keyed(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_by(|a, b| {
                a.to_lowercase()
                    .cmp(&b.to_lowercase())
                    .then_with(|| a.cmp(b))
            });

            let texts = keys
                .iter()
                .map(|k| strip_enumeration_prefix(&value_to_text(&map[k.as_str()])))
                .collect();

            OptionList {
                texts,
                sorted_keys: keys.into_iter().cloned().collect(),
            }
        }
        RawOptions::Absent => OptionList::default(),
    }
}

/// 把答案 token 当作字母解析：A → 0，B → 1 ……，超出选项范围则无效
fn letter_to_index(token: &str, option_count: usize) -> Option<usize> {
    let first = token.trim().chars().next()?;
    let upper = first.to_uppercase().next()?;
    let index = (upper as u32).checked_sub('A' as u32)? as usize;
    (index < option_count).then_some(index)
}

/// 单个答案 token 对应的选项位置，按 字母 → 键名 → 原文 的顺序匹配
fn resolve_token(token: &str, options: &OptionList) -> Option<usize> {
    if let Some(index) = letter_to_index(token, options.texts.len()) {
        return Some(index);
    }

    if !options.sorted_keys.is_empty() {
        let wanted = token.to_lowercase();
        if let Some(index) = options
            .sorted_keys
            .iter()
            .position(|k| k.to_lowercase() == wanted)
        {
            return Some(index);
        }
    }

    let cleaned = strip_enumeration_prefix(token).to_lowercase();
    options
        .texts
        .iter()
        .position(|text| text.to_lowercase() == cleaned)
}

/// 规范化单条原始记录
///
/// 无法识别的答案 token 会被静默忽略；题干为空的结果由
/// [`normalize_all`] 过滤。
pub fn normalize(raw: &RawQuestionRecord) -> Question {
    let question_text = raw.question_text();
    let explanation = raw.explanation_text();
    let answers = normalize_answers(raw.answer_value());
    let option_list = build_option_list(raw.raw_options());

    if option_list.texts.is_empty() {
        return Question {
            question_text,
            explanation,
            kind: QuestionKind::FreeText,
            options: Vec::new(),
            expected_answers: answers,
        };
    }

    let mut correct = BTreeSet::new();
    for token in &answers {
        match resolve_token(token, &option_list) {
            Some(index) => {
                correct.insert(index);
            }
            None => debug!("答案 '{}' 未匹配任何选项，已忽略", token),
        }
    }

    let kind = if correct.len() > 1 {
        QuestionKind::MultiChoice
    } else {
        QuestionKind::SingleChoice
    };

    let options = option_list
        .texts
        .into_iter()
        .enumerate()
        .map(|(index, text)| AnswerOption {
            id: OptionId(index),
            text,
            is_correct: correct.contains(&index),
        })
        .collect();

    Question {
        question_text,
        explanation,
        kind,
        options,
        expected_answers: Vec::new(),
    }
}

/// 规范化全部记录，丢弃题干为空的题目
pub fn normalize_all<'a>(records: impl IntoIterator<Item = &'a RawQuestionRecord>) -> Vec<Question> {
    records
        .into_iter()
        .map(normalize)
        .filter(|q| !q.question_text.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize_json(value: JsonValue) -> Question {
        normalize(&RawQuestionRecord::from_value(value))
    }

    fn correct_indices(question: &Question) -> Vec<usize> {
        question.correct_options().map(|o| o.id.index()).collect()
    }

    #[test]
    fn test_strip_enumeration_prefix() {
        assert_eq!(strip_enumeration_prefix("a. Paris"), "Paris");
        assert_eq!(strip_enumeration_prefix("B) Berlin"), "Berlin");
        assert_eq!(strip_enumeration_prefix("(c): Rome"), "Rome");
        assert_eq!(strip_enumeration_prefix("  d- Madrid "), "Madrid");
        assert_eq!(strip_enumeration_prefix("d - Madrid"), "d - Madrid");
        // 分隔符后必须有空白
        assert_eq!(strip_enumeration_prefix("a.Paris"), "a.Paris");
        // 多个字母不算序号
        assert_eq!(strip_enumeration_prefix("ab. Paris"), "ab. Paris");
        assert_eq!(strip_enumeration_prefix("  plain  "), "plain");
    }

    #[test]
    fn test_normalize_answers_shapes() {
        assert!(normalize_answers(None).is_empty());
        assert!(normalize_answers(Some(&json!(null))).is_empty());
        assert_eq!(normalize_answers(Some(&json!(" B "))), vec!["B"]);
        assert_eq!(normalize_answers(Some(&json!(42))), vec!["42"]);
        assert_eq!(normalize_answers(Some(&json!([" a", 2, "c "]))), vec!["a", "2", "c"]);
    }

    #[test]
    fn test_letter_answer_single_choice() {
        let q = normalize_json(json!({ "question": "2+2?", "options": ["3", "4", "5"], "answer": "B" }));
        assert_eq!(q.kind, QuestionKind::SingleChoice);
        assert_eq!(correct_indices(&q), vec![1]);
        assert_eq!(q.options[1].id, OptionId(1));
        assert_eq!(q.options[1].text, "4");
        assert!(q.expected_answers.is_empty());
    }

    #[test]
    fn test_keyed_options_multi_choice() {
        let q = normalize_json(json!({
            "question": "Pick primes",
            "options": { "d": "7", "a": "4", "c": "6", "b": "5" },
            "correct_answers": ["b", "d"]
        }));
        assert_eq!(q.kind, QuestionKind::MultiChoice);
        let texts: Vec<_> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["4", "5", "6", "7"]);
        assert_eq!(correct_indices(&q), vec![1, 3]);
    }

    #[test]
    fn test_keyed_options_sorted_case_insensitively() {
        let q = normalize_json(json!({
            "question": "Order",
            "options": { "B": "second", "a": "first", "C": "third" },
            "answer": "c"
        }));
        let texts: Vec<_> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(correct_indices(&q), vec![2]);
    }

    #[test]
    fn test_key_match_when_letter_out_of_range() {
        let q = normalize_json(json!({
            "question": "Keys",
            "options": { "opt1": "x", "opt2": "y" },
            "answer": "OPT2"
        }));
        assert_eq!(correct_indices(&q), vec![1]);
    }

    #[test]
    fn test_answer_as_option_text() {
        let q = normalize_json(json!({
            "question": "Capital?",
            "options": ["a. Paris", "b. Rome", "c. Madrid"],
            "answer": "rome"
        }));
        // 'r' 超出选项范围，回退到原文匹配
        assert_eq!(correct_indices(&q), vec![1]);
        assert_eq!(q.options[0].text, "Paris");
    }

    #[test]
    fn test_answer_text_with_prefix_is_stripped() {
        let q = normalize_json(json!({
            "question": "Capital?",
            "options": ["Paris", "Rome", "Madrid", "Lisbon", "Oslo", "Bern", "Vienna", "Prague", "Riga", "Kyiv", "Sofia", "Tallinn", "Warsaw", "Dublin", "Athens", "Zagreb", "Minsk", "Vilnius", "Valletta", "Monaco"],
            "answer": "x) Valletta"
        }));
        // 'X' 对应第 24 个选项，超出范围，回退到原文匹配
        assert_eq!(correct_indices(&q), vec![18]);
    }

    #[test]
    fn test_letter_wins_over_text() {
        // 答案 "Berlin" 的首字母 B 在范围内，按字母处理
        let q = normalize_json(json!({
            "question": "Capital of Germany?",
            "options": ["Berlin", "Bonn", "Munich"],
            "answer": "Berlin"
        }));
        assert_eq!(correct_indices(&q), vec![1]);
    }

    #[test]
    fn test_equivalent_answer_representations() {
        let options = json!({ "a": "red", "b": "green", "c": "yellow" });
        let by_letter = normalize_json(json!({ "question": "Q", "options": options, "answer": ["A", "C"] }));
        let by_key = normalize_json(json!({ "question": "Q", "options": options, "answer": ["a", "c"] }));
        let by_text = normalize_json(json!({ "question": "Q", "options": ["red", "green", "yellow"], "answer": ["red", "yellow"] }));

        assert_eq!(correct_indices(&by_letter), vec![0, 2]);
        assert_eq!(correct_indices(&by_key), vec![0, 2]);
        assert_eq!(correct_indices(&by_text), vec![0, 2]);
    }

    #[test]
    fn test_unmatched_tokens_are_dropped() {
        let q = normalize_json(json!({ "question": "Q", "options": ["x", "y"], "answer": ["zzz", "?"] }));
        assert_eq!(q.kind, QuestionKind::SingleChoice);
        assert!(correct_indices(&q).is_empty());
    }

    #[test]
    fn test_duplicate_tokens_count_once() {
        let q = normalize_json(json!({ "question": "Q", "options": ["x", "y"], "answer": ["A", "a", "x"] }));
        assert_eq!(q.kind, QuestionKind::SingleChoice);
        assert_eq!(correct_indices(&q), vec![0]);
    }

    #[test]
    fn test_free_text_keeps_answers_verbatim() {
        let q = normalize_json(json!({ "question": "Capital of France?", "answer": "Paris" }));
        assert_eq!(q.kind, QuestionKind::FreeText);
        assert!(q.options.is_empty());
        assert_eq!(q.expected_answers, vec!["Paris"]);

        let q = normalize_json(json!({ "prompt": "Prefix?", "correct_answer": "a. kept" }));
        assert_eq!(q.expected_answers, vec!["a. kept"]);
    }

    #[test]
    fn test_non_string_list_options_are_stringified() {
        let q = normalize_json(json!({ "question": "Pick 2", "options": [1, 2, 3], "answer": 2 }));
        let texts: Vec<_> = q.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(texts, vec!["1", "2", "3"]);
        assert_eq!(correct_indices(&q), vec![1]);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let raw = RawQuestionRecord::from_value(json!({
            "question": "Pick primes",
            "options": { "a": "4", "b": "5", "c": "6", "d": "7" },
            "correct_answers": ["b", "d"],
            "explanation": "5 and 7"
        }));
        assert_eq!(normalize(&raw), normalize(&raw));
    }

    #[test]
    fn test_normalize_all_drops_empty_question_text() {
        let records: Vec<_> = [
            json!({ "question": "kept", "answer": "x" }),
            json!({ "question": "", "answer": "x" }),
            json!({ "options": ["a"] }),
            json!("not an object"),
        ]
        .into_iter()
        .map(RawQuestionRecord::from_value)
        .collect();

        let questions = normalize_all(&records);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_text, "kept");
    }
}
