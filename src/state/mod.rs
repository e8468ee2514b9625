pub mod storage;
pub mod types;

pub use storage::{clear_saved_form, get_state_path, load_state, save_state};
pub use types::{FormDraft, SavedState};
