pub mod loaders;
pub mod question;
pub mod raw;

pub use loaders::parse_question_document;
pub use question::{AnswerOption, OptionId, Question, QuestionKind};
pub use raw::{RawOptions, RawQuestionRecord};
