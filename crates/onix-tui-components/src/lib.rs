//! Shared TUI components for the Onix dashboard.
//!
//! This crate provides reusable UI components, widgets, and utilities
//! for building terminal user interfaces.
//!
//! # Architecture
//!
//! The crate is organized into:
//! - `widgets` - Reusable ratatui widgets (header, footer, table, action bar, toasts, dialogs)
//! - `theme` - Colors, styles, and visual constants
//! - `utils` - Text wrapping, formatting utilities
//!
//! # Usage
//!
//! Components are designed to be data-agnostic. Pass data through simple
//! structs rather than depending on domain types.

pub mod theme;
pub mod utils;
pub mod widgets;

pub use theme::Theme;
pub use utils::{format_elapsed, truncate, wrap_text};
pub use widgets::action_bar::{ActionBar, ActionButton};
pub use widgets::dialogs::{centered_rect, ConfirmDialog, TextPopup};
pub use widgets::footer::Footer;
pub use widgets::header::{Header, HeaderStat, StatusIndicator};
pub use widgets::table::{DataTable, TableCell, TableColumn, TableRow};
pub use widgets::toast::{ToastStack, ToastView};
