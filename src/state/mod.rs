//! Application state module

mod app_state;
mod auto_advance;
mod forms;
mod progress_state;

pub use app_state::*;
pub use auto_advance::*;
pub use forms::*;
pub use progress_state::*;
