pub mod display;
pub mod size;
pub mod state;

pub use display::{display_letter, display_options};
pub use size::{SessionSize, DEFAULT_SESSION_SIZE};
pub use state::{start_session, PageDirection, SessionState, PAGE_SIZE};
