pub mod console;
pub mod renderer;

pub use console::Console;
pub use renderer::{render, render_matches, SortOrder};
