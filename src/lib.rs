//! # Quiz Widget
//!
//! 读取 JSON 题目文件、规范化题目、分页出题并判分的答题组件，附带一个静态资源服务
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 原始记录 `RawQuestionRecord` 与规范化后的 `Question`
//! - `models/loaders` - 解析题目文件（顶层必须是数组）
//!
//! ### ② 业务能力层（Services）
//! - `normalizer` - 把各种写法的题目统一成 `Question`
//! - `repository` - 题库，加载一次后只读
//! - `scoring` - 按题型判分，生成选项高亮状态
//!
//! ### ③ 会话层（Session）
//! - `session/` - 选题、打乱、固定页大小分页、跳题
//!
//! ### ④ 流程层（Workflow）
//! - `workflow/` - 把用户操作映射为新的会话状态和渲染指令
//!
//! 流程层是纯库接口：展示层持有 `SessionState`，把用户操作转成 `Command`
//! 交给 `QuizFlow::handle`，再按返回的 `RenderInstruction` 更新界面。
//! 二进制程序本身只提供静态资源，不暴露答题接口。
//!
//! ### ⑤ 基础设施
//! - `clients/` - 读取题目文件（本地 / HTTP，禁用缓存）
//! - `server/` - 静态资源服务
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod server;
pub mod services;
pub mod session;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{QuestionSource, SourceClient};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerOption, OptionId, Question, QuestionKind, RawQuestionRecord};
pub use services::{QuestionRepository, UserResponse, Verdict};
pub use session::{start_session, PageDirection, SessionSize, SessionState, PAGE_SIZE};
pub use workflow::{Command, QuizFlow, RenderInstruction};
