//! UI widget modules for the TUI frontend.
//!
//! Each sub-module renders a single UI component using ratatui.

pub mod location;
pub mod panel;
pub mod popup;
pub mod statusbar;
pub mod tab_bar;
