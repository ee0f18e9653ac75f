//! 判分服务 - 业务能力层
//!
//! 按题型比较用户作答与标准答案：
//! - 单选：恰好选中一个且该选项正确
//! - 多选：选中集合与正确集合完全一致
//! - 填空：去空白、忽略大小写比较；双方都是数字时按数值比较

use crate::models::question::{OptionId, Question, QuestionKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 解析前缀
pub const EXPLANATION_LABEL: &str = "Explanation:";

/// 用户对一道题的作答
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserResponse {
    /// 选择题：选中的选项
    Selected(BTreeSet<OptionId>),
    /// 填空题：输入的文本
    Text(String),
    /// 未作答
    #[default]
    Unanswered,
}

impl UserResponse {
    pub fn selected(ids: impl IntoIterator<Item = OptionId>) -> Self {
        UserResponse::Selected(ids.into_iter().collect())
    }

    pub fn text(text: impl Into<String>) -> Self {
        UserResponse::Text(text.into())
    }

    fn selected_ids(&self) -> BTreeSet<OptionId> {
        match self {
            UserResponse::Selected(ids) => ids.clone(),
            _ => BTreeSet::new(),
        }
    }

    fn submitted_text(&self) -> &str {
        match self {
            UserResponse::Text(text) => text,
            _ => "",
        }
    }
}

/// 单题判分结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub correct: bool,
    /// 提交后展示的解析或正确答案，没有可展示内容时为空串
    pub correct_display: String,
}

/// 选项高亮状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionMark {
    /// 正确选项
    Correct,
    /// 选中但错误
    Incorrect,
    /// 其他
    Neutral,
}

/// 一页的判分汇总
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageScore {
    pub verdicts: Vec<Verdict>,
    pub score: usize,
    pub total: usize,
}

impl PageScore {
    /// 形如 "Score: 3 / 10"
    pub fn summary(&self) -> String {
        format!("Score: {} / {}", self.score, self.total)
    }
}

/// 判分
pub fn score(question: &Question, response: &UserResponse) -> Verdict {
    Verdict {
        correct: is_correct(question, response),
        correct_display: correct_display(question),
    }
}

/// 作答是否正确
pub fn is_correct(question: &Question, response: &UserResponse) -> bool {
    match question.kind {
        QuestionKind::SingleChoice => {
            let selected = response.selected_ids();
            if selected.len() != 1 {
                return false;
            }
            selected
                .iter()
                .next()
                .and_then(|id| question.option(*id))
                .map(|o| o.is_correct)
                .unwrap_or(false)
        }
        QuestionKind::MultiChoice => {
            let correct: BTreeSet<OptionId> = question.correct_options().map(|o| o.id).collect();
            response.selected_ids() == correct
        }
        QuestionKind::FreeText => {
            free_text_matches(&question.expected_answers, response.submitted_text())
        }
    }
}

/// 填空题比较
///
/// 任一标准答案能解析为数字且提交内容也是数字时，数值相等即可；
/// 否则（或数值不等时）回退到忽略大小写和首尾空白的字符串比较。
pub fn free_text_matches(expected: &[String], submitted: &str) -> bool {
    if expected.is_empty() {
        return false;
    }

    let submitted = submitted.trim();

    if let Some(user_number) = parse_number(submitted) {
        let any_numeric = expected.iter().any(|v| parse_number(v).is_some());
        if any_numeric
            && expected
                .iter()
                .filter_map(|v| parse_number(v))
                .any(|n| n == user_number)
        {
            return true;
        }
    }

    let user_norm = submitted.to_lowercase();
    expected
        .iter()
        .any(|v| v.trim().to_lowercase() == user_norm)
}

/// 空串不算数字
fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 提交后展示的文本
///
/// 有解析时展示解析，统一带 "Explanation: " 前缀（已有则不重复）；
/// 否则选择题用 ", " 连接正确选项，填空题用 " / " 连接标准答案。
/// 没有可展示内容时为空串。
pub fn correct_display(question: &Question) -> String {
    let explanation = question.explanation.trim();
    if !explanation.is_empty() {
        return if explanation.starts_with(EXPLANATION_LABEL) {
            explanation.to_string()
        } else {
            format!("{} {}", EXPLANATION_LABEL, explanation)
        };
    }

    if question.kind.is_choice() {
        question
            .correct_options()
            .map(|o| o.text.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        question.expected_answers.join(" / ")
    }
}

/// 每个选项提交后的高亮状态，顺序与题目选项一致
pub fn option_marks(question: &Question, response: &UserResponse) -> Vec<(OptionId, OptionMark)> {
    let selected = response.selected_ids();
    question
        .options
        .iter()
        .map(|option| {
            let mark = if option.is_correct {
                OptionMark::Correct
            } else if selected.contains(&option.id) {
                OptionMark::Incorrect
            } else {
                OptionMark::Neutral
            };
            (option.id, mark)
        })
        .collect()
}

/// 整页判分，缺少的作答按未作答处理
pub fn score_page(questions: &[Question], responses: &[UserResponse]) -> PageScore {
    let unanswered = UserResponse::Unanswered;
    let verdicts: Vec<Verdict> = questions
        .iter()
        .enumerate()
        .map(|(i, q)| score(q, responses.get(i).unwrap_or(&unanswered)))
        .collect();

    PageScore {
        score: verdicts.iter().filter(|v| v.correct).count(),
        total: questions.len(),
        verdicts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw::RawQuestionRecord;
    use crate::services::normalizer::normalize;
    use serde_json::json;

    fn question(value: serde_json::Value) -> Question {
        normalize(&RawQuestionRecord::from_value(value))
    }

    fn option_id(q: &Question, text: &str) -> OptionId {
        q.options.iter().find(|o| o.text == text).map(|o| o.id).unwrap()
    }

    #[test]
    fn test_single_choice() {
        let q = question(json!({ "question": "2+2?", "options": ["3", "4", "5"], "answer": "B" }));
        let four = option_id(&q, "4");
        let three = option_id(&q, "3");

        assert!(score(&q, &UserResponse::selected([four])).correct);
        assert!(!score(&q, &UserResponse::selected([three])).correct);
        assert!(!score(&q, &UserResponse::selected([three, four])).correct);
        assert!(!score(&q, &UserResponse::Selected(BTreeSet::new())).correct);
        assert!(!score(&q, &UserResponse::Unanswered).correct);
    }

    #[test]
    fn test_single_choice_without_correct_option_never_scores() {
        let q = question(json!({ "question": "?", "options": ["x", "y"] }));
        assert_eq!(q.kind, QuestionKind::SingleChoice);
        for option in &q.options {
            assert!(!is_correct(&q, &UserResponse::selected([option.id])));
        }
    }

    #[test]
    fn test_multi_choice_requires_exact_set() {
        let q = question(json!({
            "question": "Pick primes",
            "options": { "a": "4", "b": "5", "c": "6", "d": "7" },
            "correct_answers": ["b", "d"]
        }));
        let b = OptionId(1);
        let d = OptionId(3);

        assert!(score(&q, &UserResponse::selected([b, d])).correct);
        assert!(score(&q, &UserResponse::selected([d, b])).correct);
        assert!(!score(&q, &UserResponse::selected([b])).correct);
        assert!(!score(&q, &UserResponse::selected([b, d, OptionId(0)])).correct);
    }

    #[test]
    fn test_free_text_case_and_whitespace_insensitive() {
        let q = question(json!({ "question": "Capital of France?", "answer": "Paris" }));
        for answer in ["paris", " Paris ", "PARIS"] {
            assert!(score(&q, &UserResponse::text(answer)).correct, "{}", answer);
        }
        assert!(!score(&q, &UserResponse::text("Lyon")).correct);
        assert!(!score(&q, &UserResponse::Unanswered).correct);
    }

    #[test]
    fn test_free_text_numeric_tolerance() {
        let q = question(json!({ "question": "Value of pi to 1dp?", "answer": "3.1" }));
        assert!(score(&q, &UserResponse::text("3.1")).correct);
        assert!(score(&q, &UserResponse::text("3.10")).correct);
        assert!(!score(&q, &UserResponse::text("3.2")).correct);

        let q = question(json!({ "question": "Seven?", "answer": 7 }));
        assert!(score(&q, &UserResponse::text("7.0")).correct);
        assert!(score(&q, &UserResponse::text(" 7 ")).correct);
    }

    #[test]
    fn test_free_text_string_match_when_numbers_differ() {
        let expected = vec!["42".to_string(), "forty-two".to_string()];
        assert!(free_text_matches(&expected, "Forty-Two"));
        assert!(free_text_matches(&expected, "42.0"));
        assert!(!free_text_matches(&expected, "41"));
    }

    #[test]
    fn test_free_text_without_expected_answers_is_wrong() {
        assert!(!free_text_matches(&[], "anything"));
        assert!(!free_text_matches(&[], ""));
    }

    #[test]
    fn test_correct_display() {
        let q = question(json!({ "question": "2+2?", "options": ["3", "4"], "answer": "B", "explanation": "Basic sum" }));
        assert_eq!(correct_display(&q), "Explanation: Basic sum");

        let q = question(json!({ "question": "2+2?", "options": ["3", "4"], "answer": "B", "explanation": "Explanation: already" }));
        assert_eq!(correct_display(&q), "Explanation: already");

        let q = question(json!({ "question": "Pick", "options": ["x", "y", "z"], "answer": ["a", "c"] }));
        assert_eq!(correct_display(&q), "x, z");

        let q = question(json!({ "question": "Say hi", "answer": ["hi", "hello"] }));
        assert_eq!(correct_display(&q), "hi / hello");

        let q = question(json!({ "question": "Capital of France?", "answer": "Paris" }));
        assert_eq!(correct_display(&q), "Paris");
        assert!(!correct_display(&q).starts_with(EXPLANATION_LABEL));

        let q = question(json!({ "question": "Nothing", "options": ["x"] }));
        assert_eq!(correct_display(&q), "");
    }

    #[test]
    fn test_option_marks() {
        let q = question(json!({ "question": "2+2?", "options": ["3", "4", "5"], "answer": "B" }));
        let marks = option_marks(&q, &UserResponse::selected([OptionId(0)]));
        assert_eq!(
            marks,
            vec![
                (OptionId(0), OptionMark::Incorrect),
                (OptionId(1), OptionMark::Correct),
                (OptionId(2), OptionMark::Neutral),
            ]
        );
    }

    #[test]
    fn test_score_page_counts_correct() {
        let questions = vec![
            question(json!({ "question": "2+2?", "options": ["3", "4"], "answer": "B" })),
            question(json!({ "question": "Capital?", "answer": "Paris" })),
            question(json!({ "question": "Skipped", "answer": "x" })),
        ];
        let responses = vec![UserResponse::selected([OptionId(1)]), UserResponse::text("paris")];

        let page = score_page(&questions, &responses);
        assert_eq!(page.score, 2);
        assert_eq!(page.total, 3);
        assert_eq!(page.verdicts.len(), 3);
        assert_eq!(page.summary(), "Score: 2 / 3");
    }
}
