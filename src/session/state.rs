//! 会话状态与分页
//!
//! 会话从题库复制一份题目（非顺序模式下先打乱），截取用户选择的题量，
//! 再按固定页大小分页。所有操作都接收旧状态、返回新状态，不依赖全局变量。

use crate::error::{SessionError, SessionStateError};
use crate::models::question::Question;
use crate::services::repository::QuestionRepository;
use crate::session::size::SessionSize;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::{debug, info, warn};

/// 每页题数
pub const PAGE_SIZE: usize = 10;

/// 翻页方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageDirection {
    Next,
    Prev,
}

/// 当前会话状态
///
/// 可以序列化交给展示层保存；反序列化时先经过 [`SessionSnapshot`] 校验，
/// 不满足分页约束的状态会被拒绝。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct SessionState {
    /// 本次会话的题目（已截取到 `total_size`）
    pool: Vec<Question>,
    total_size: usize,
    page_size: usize,
    page_index: usize,
    /// 当前题目在本页中的位置
    current_local_index: usize,
    sequential: bool,
    all_mode: bool,
}

/// 会话状态的原始序列化形式
#[derive(Debug, Deserialize)]
struct SessionSnapshot {
    pool: Vec<Question>,
    total_size: usize,
    page_size: usize,
    page_index: usize,
    current_local_index: usize,
    sequential: bool,
    all_mode: bool,
}

impl TryFrom<SessionSnapshot> for SessionState {
    type Error = SessionStateError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self, Self::Error> {
        if snapshot.total_size == 0 {
            return Err(SessionStateError::Empty);
        }
        if snapshot.page_size != PAGE_SIZE {
            return Err(SessionStateError::PageSize {
                expected: PAGE_SIZE,
                found: snapshot.page_size,
            });
        }
        if snapshot.pool.len() != snapshot.total_size {
            return Err(SessionStateError::PoolSize {
                pool: snapshot.pool.len(),
                total: snapshot.total_size,
            });
        }

        let page_start = snapshot.page_index.saturating_mul(snapshot.page_size);
        let page_len = snapshot
            .total_size
            .saturating_sub(page_start)
            .min(snapshot.page_size);
        if snapshot.current_local_index >= page_len {
            return Err(SessionStateError::OutOfRange {
                page_index: snapshot.page_index,
                local_index: snapshot.current_local_index,
                total: snapshot.total_size,
            });
        }

        Ok(SessionState {
            pool: snapshot.pool,
            total_size: snapshot.total_size,
            page_size: snapshot.page_size,
            page_index: snapshot.page_index,
            current_local_index: snapshot.current_local_index,
            sequential: snapshot.sequential,
            all_mode: snapshot.all_mode,
        })
    }
}

/// 开始新会话
///
/// # 参数
/// - `repository`: 题库
/// - `size`: 题量（数字或全部）
/// - `sequential`: 顺序模式，不打乱题目和选项
/// - `rng`: 随机数源
///
/// # 返回
/// 题库为空时返回 [`SessionError::NoQuestionsAvailable`]
pub fn start_session<R: Rng + ?Sized>(
    repository: &QuestionRepository,
    size: SessionSize,
    sequential: bool,
    rng: &mut R,
) -> Result<SessionState, SessionError> {
    if repository.is_empty() {
        warn!("⚠️ 题库为空，无法开始会话");
        return Err(SessionError::NoQuestionsAvailable);
    }

    let mut pool = repository.questions().to_vec();
    if !sequential {
        pool.shuffle(rng);
    }

    let total_size = size.resolve(pool.len());
    pool.truncate(total_size);

    info!(
        "🚀 开始新会话: {} 道题 (题量: {}, 顺序模式: {})",
        total_size, size, sequential
    );

    Ok(SessionState {
        pool,
        total_size,
        page_size: PAGE_SIZE,
        page_index: 0,
        current_local_index: 0,
        sequential,
        all_mode: size.is_all(),
    })
}

impl SessionState {
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn current_local_index(&self) -> usize {
        self.current_local_index
    }

    pub fn is_sequential(&self) -> bool {
        self.sequential
    }

    pub fn is_all_mode(&self) -> bool {
        self.all_mode
    }

    /// 本次会话的全部题目
    pub fn pool(&self) -> &[Question] {
        &self.pool
    }

    /// 当前题目在整个会话中的位置
    pub fn global_index(&self) -> usize {
        self.page_index * self.page_size + self.current_local_index
    }

    /// 总页数
    pub fn page_count(&self) -> usize {
        self.total_size.div_ceil(self.page_size)
    }

    /// 当前页在 pool 中的范围
    pub fn page_range(&self) -> Range<usize> {
        let start = self.page_index * self.page_size;
        let end = (start + self.page_size).min(self.total_size);
        start..end
    }

    /// 当前页的题目
    ///
    /// 返回深拷贝，渲染时打乱选项不会影响会话中的题目。
    pub fn current_page(&self) -> Vec<Question> {
        self.pool[self.page_range()].to_vec()
    }

    pub fn can_next_page(&self) -> bool {
        (self.page_index + 1) * self.page_size < self.total_size
    }

    pub fn can_prev_page(&self) -> bool {
        self.page_index > 0
    }

    /// 翻页，越界时保持不变
    pub fn advance_page(mut self, direction: PageDirection) -> Self {
        match direction {
            PageDirection::Next if self.can_next_page() => self.page_index += 1,
            PageDirection::Prev if self.can_prev_page() => self.page_index -= 1,
            _ => {
                debug!("翻页越界，忽略 ({:?})", direction);
                return self;
            }
        }
        self.current_local_index = 0;
        self
    }

    /// 跳转到指定题目（从 0 开始），超出范围时夹到 `[0, total_size - 1]`
    pub fn goto_global_index(mut self, target: usize) -> Self {
        let clamped = target.min(self.total_size.saturating_sub(1));
        self.page_index = clamped / self.page_size;
        self.current_local_index = clamped % self.page_size;
        self
    }

    /// 下一题
    pub fn next_question(self) -> Self {
        let target = self.global_index() + 1;
        self.goto_global_index(target)
    }

    /// 上一题
    pub fn prev_question(self) -> Self {
        let target = self.global_index().saturating_sub(1);
        self.goto_global_index(target)
    }
}
