pub mod normalizer;
pub mod repository;
pub mod scoring;

pub use normalizer::{normalize, normalize_all, strip_enumeration_prefix};
pub use repository::QuestionRepository;
pub use scoring::{option_marks, score, score_page, OptionMark, PageScore, UserResponse, Verdict};
