pub mod quiz_flow;
pub mod render;

pub use quiz_flow::{navigator, Command, QuizFlow};
pub use render::{
    NavEntry, NavigatorView, OptionView, PageView, QuestionResult, QuestionView,
    RenderInstruction, ResultsView, NO_QUESTIONS_MESSAGE,
};
