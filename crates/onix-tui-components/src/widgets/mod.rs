//! Reusable TUI widgets.

pub mod action_bar;
pub mod dialogs;
pub mod footer;
pub mod header;
pub mod table;
pub mod toast;
