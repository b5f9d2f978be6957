//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and the line of
//!   the selected tree node
//! - [`tree`]: The printed syntax tree with a selection cursor
//! - [`status`]: Status bar with keybindings and position
//!
//! Each pane module exports a primary `render_*` function plus the scroll
//! state it keeps between frames.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{render_source_pane, SourceScrollState};
pub use status::render_status_bar;
pub use tree::{render_tree_pane, TreeScrollState};
