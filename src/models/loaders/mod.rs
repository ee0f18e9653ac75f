pub mod json_loader;

pub use json_loader::parse_question_document;
