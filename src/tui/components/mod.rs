//! TUI components

mod help;
mod task_row;
mod text_input;

pub use help::HelpOverlay;
pub use task_row::task_row;
pub use text_input::render_text_field;
