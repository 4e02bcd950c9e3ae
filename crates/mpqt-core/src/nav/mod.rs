//! Navigation logic.
//!
//! [`cursor::Cursor`] tracks the current directory with its
//! [`history::History`]; [`sort`] and [`filter`] order and narrow a
//! listing; [`panel::Panel`] combines them into the row model a view
//! renders.

pub mod cursor;
pub mod filter;
pub mod history;
pub mod panel;
pub mod sort;
