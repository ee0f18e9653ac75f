//! 渲染指令
//!
//! 流程层把会话状态翻译成展示层可以直接消费的数据，展示层不接触题库或判分逻辑。

use crate::models::question::{OptionId, QuestionKind};
use crate::services::scoring::{OptionMark, Verdict};
use serde::Serialize;

/// 题库为空时提示给用户的消息
pub const NO_QUESTIONS_MESSAGE: &str = "No questions found. If opening index.html directly, please serve it via a local server so the browser can fetch questions.json.";

/// 展示层需要执行的动作
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// 渲染当前页
    Page(PageView),
    /// 展示当前页的判分结果
    Results(ResultsView),
    /// 弹出提示
    Alert { message: String },
    /// 无需更新界面
    Unchanged,
}

/// 当前页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page_index: usize,
    pub page_count: usize,
    pub questions: Vec<QuestionView>,
    /// 需要滚动到的题目（页内位置）
    pub focus_local_index: usize,
    pub navigator: NavigatorView,
}

/// 单道题的展示数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    /// 页内序号，从 1 开始
    pub number: usize,
    pub global_index: usize,
    pub question_text: String,
    pub kind: QuestionKind,
    /// 已按本次渲染的顺序排列；填空题为空
    pub options: Vec<OptionView>,
}

/// 单个选项的展示数据
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView {
    pub id: OptionId,
    /// 展示序号（"A"、"B"…），与选项 id 无关
    pub letter: String,
    pub text: String,
}

/// 题号导航
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigatorView {
    pub entries: Vec<NavEntry>,
    pub total: usize,
    pub can_prev_page: bool,
    pub can_next_page: bool,
}

/// 导航中的一个题号按钮
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// 显示的题号，从 1 开始
    pub number: usize,
    pub global_index: usize,
    pub active: bool,
}

/// 当前页判分结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultsView {
    pub results: Vec<QuestionResult>,
    pub score: usize,
    pub total: usize,
    /// 形如 "Score: 3 / 10"
    pub summary: String,
    pub can_prev_page: bool,
    pub can_next_page: bool,
}

/// 单题判分结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionResult {
    pub verdict: Verdict,
    /// 按题库顺序排列的选项高亮状态；填空题为空
    pub marks: Vec<(OptionId, OptionMark)>,
}
