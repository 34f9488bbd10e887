//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - LaTeX submission file and JSON report exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
