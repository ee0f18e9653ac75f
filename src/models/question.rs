use serde::{Deserialize, Serialize};
use std::fmt;

/// 选项标识
///
/// 按选项在题目中的原始位置生成，同一道题多次渲染时保持不变，
/// 因此打乱展示顺序不会影响正误判断。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OptionId(pub usize);

impl OptionId {
    /// 选项在题库顺序中的位置
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "o_{}", self.0)
    }
}

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// 单选
    SingleChoice,
    /// 多选
    MultiChoice,
    /// 填空（自由文本）
    FreeText,
}

impl QuestionKind {
    /// 是否为选择题
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionKind::FreeText)
    }
}

/// 规范化后的选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: OptionId,
    /// 展示文本（已去掉 "A." 之类的序号前缀）
    pub text: String,
    pub is_correct: bool,
}

/// 规范化后的题目，加载完成后不再修改
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question_text: String,
    #[serde(default)]
    pub explanation: String,
    pub kind: QuestionKind,
    /// 填空题为空
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    /// 仅填空题非空
    #[serde(default)]
    pub expected_answers: Vec<String>,
}

impl Question {
    /// 所有正确选项
    pub fn correct_options(&self) -> impl Iterator<Item = &AnswerOption> {
        self.options.iter().filter(|o| o.is_correct)
    }

    /// 根据 id 查找选项
    pub fn option(&self, id: OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id == id)
    }
}
