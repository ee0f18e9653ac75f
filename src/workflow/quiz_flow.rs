//! 答题流程 - 流程层
//!
//! 核心职责：把用户操作（开始、提交、翻页、跳题）映射为新的会话状态和一条渲染指令
//!
//! - 不持有界面资源，事件循环由展示层负责
//! - 会话状态由调用方持有，每次操作传入旧状态、拿回新状态
//! - 开始新会话时整体替换旧状态，不做合并

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::SessionError;
use crate::models::question::Question;
use crate::services::repository::QuestionRepository;
use crate::services::scoring::{option_marks, score_page, UserResponse};
use crate::session::{
    display_letter, display_options, start_session, PageDirection, SessionSize, SessionState,
};
use crate::workflow::render::{
    NavEntry, NavigatorView, OptionView, PageView, QuestionResult, QuestionView,
    RenderInstruction, ResultsView, NO_QUESTIONS_MESSAGE,
};

/// 用户操作
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// 开始 / 重新开始（含"重新打乱"、"再试一次"）
    Start { size: SessionSize, sequential: bool },
    /// 提交当前页的作答，按页内顺序排列
    Submit { responses: Vec<UserResponse> },
    /// 下一页
    NextPage,
    /// 上一页
    PrevPage,
    /// "跳到第 N 题"，N 从 1 开始
    JumpTo { number: usize },
    /// 点击导航中的题号
    GotoIndex { global_index: usize },
    /// 下一题
    NextQuestion,
    /// 上一题
    PrevQuestion,
}

/// 答题流程
pub struct QuizFlow<R = StdRng> {
    repository: QuestionRepository,
    rng: R,
}

impl QuizFlow<StdRng> {
    /// 使用系统熵初始化随机数
    pub fn new(repository: QuestionRepository) -> Self {
        Self::with_rng(repository, StdRng::from_entropy())
    }
}

impl<R: Rng> QuizFlow<R> {
    /// 指定随机数源，测试中用固定种子
    pub fn with_rng(repository: QuestionRepository, rng: R) -> Self {
        Self { repository, rng }
    }

    pub fn repository(&self) -> &QuestionRepository {
        &self.repository
    }

    /// 重新加载后整体替换题库；已开始的会话不受影响
    pub fn reload(&mut self, repository: QuestionRepository) {
        info!("🔄 题库已替换: {} 道题", repository.len());
        self.repository = repository;
    }

    /// 处理一次用户操作
    ///
    /// # 参数
    /// - `state`: 当前会话（尚未开始时为 `None`）
    /// - `command`: 用户操作
    ///
    /// # 返回
    /// 返回 (新的会话状态, 渲染指令)
    pub fn handle(
        &mut self,
        state: Option<SessionState>,
        command: Command,
    ) -> (Option<SessionState>, RenderInstruction) {
        debug!("处理操作: {:?}", command);

        match state {
            Some(state) => self.apply(state, command),
            None => match command {
                Command::Start { size, sequential } => self.start(None, size, sequential),
                _ => {
                    debug!("会话未开始，忽略操作");
                    (None, RenderInstruction::Unchanged)
                }
            },
        }
    }

    fn apply(
        &mut self,
        state: SessionState,
        command: Command,
    ) -> (Option<SessionState>, RenderInstruction) {
        let state = match command {
            Command::Start { size, sequential } => {
                return self.start(Some(state), size, sequential);
            }
            Command::Submit { responses } => {
                let results = self.evaluate(&state, &responses);
                return (Some(state), RenderInstruction::Results(results));
            }
            Command::NextPage => state.advance_page(PageDirection::Next),
            Command::PrevPage => state.advance_page(PageDirection::Prev),
            Command::JumpTo { number } => state.goto_global_index(number.saturating_sub(1)),
            Command::GotoIndex { global_index } => state.goto_global_index(global_index),
            Command::NextQuestion => state.next_question(),
            Command::PrevQuestion => state.prev_question(),
        };

        let page = self.render_page(&state);
        (Some(state), RenderInstruction::Page(page))
    }

    fn start(
        &mut self,
        previous: Option<SessionState>,
        size: SessionSize,
        sequential: bool,
    ) -> (Option<SessionState>, RenderInstruction) {
        match start_session(&self.repository, size, sequential, &mut self.rng) {
            Ok(state) => {
                let page = self.render_page(&state);
                (Some(state), RenderInstruction::Page(page))
            }
            Err(SessionError::NoQuestionsAvailable) => {
                warn!("⚠️ 没有可用题目，保持原会话");
                (
                    previous,
                    RenderInstruction::Alert {
                        message: NO_QUESTIONS_MESSAGE.to_string(),
                    },
                )
            }
        }
    }

    /// 渲染当前页：每次渲染都基于题目副本重新决定选项顺序
    pub fn render_page(&mut self, state: &SessionState) -> PageView {
        let start = state.page_range().start;
        let questions = state
            .current_page()
            .iter()
            .enumerate()
            .map(|(local, question)| {
                self.question_view(question, local, start + local, state.is_sequential())
            })
            .collect();

        PageView {
            page_index: state.page_index(),
            page_count: state.page_count(),
            questions,
            focus_local_index: state.current_local_index(),
            navigator: navigator(state),
        }
    }

    fn question_view(
        &mut self,
        question: &Question,
        local_index: usize,
        global_index: usize,
        sequential: bool,
    ) -> QuestionView {
        let options = display_options(question, sequential, &mut self.rng)
            .into_iter()
            .enumerate()
            .map(|(position, option)| OptionView {
                id: option.id,
                letter: display_letter(position),
                text: option.text,
            })
            .collect();

        QuestionView {
            number: local_index + 1,
            global_index,
            question_text: question.question_text.clone(),
            kind: question.kind,
            options,
        }
    }

    /// 对当前页判分
    fn evaluate(&self, state: &SessionState, responses: &[UserResponse]) -> ResultsView {
        let page = state.current_page();
        let page_score = score_page(&page, responses);

        let unanswered = UserResponse::Unanswered;
        let results = page
            .iter()
            .zip(page_score.verdicts.iter())
            .enumerate()
            .map(|(i, (question, verdict))| QuestionResult {
                verdict: verdict.clone(),
                marks: option_marks(question, responses.get(i).unwrap_or(&unanswered)),
            })
            .collect();

        info!(
            "📊 第 {} 页判分完成: {}",
            state.page_index() + 1,
            page_score.summary()
        );

        ResultsView {
            results,
            score: page_score.score,
            total: page_score.total,
            summary: page_score.summary(),
            can_prev_page: state.can_prev_page(),
            can_next_page: state.can_next_page(),
        }
    }
}

/// 题号导航：全部模式列出整场会话的题号，否则只列出当前页
pub fn navigator(state: &SessionState) -> NavigatorView {
    let current = state.global_index();
    let indices = if state.is_all_mode() {
        0..state.total_size()
    } else {
        state.page_range()
    };

    NavigatorView {
        entries: indices
            .map(|global_index| NavEntry {
                number: global_index + 1,
                global_index,
                active: global_index == current,
            })
            .collect(),
        total: state.total_size(),
        can_prev_page: state.can_prev_page(),
        can_next_page: state.can_next_page(),
    }
}
