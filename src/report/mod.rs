//! Reporting utilities: LaTeX formatting and terminal summaries.

pub mod format;

pub use format::*;
