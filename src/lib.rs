//! `ribbon-curves` library crate.
//!
//! The binary (`ribbon`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future plotting front-ends, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod model;
pub mod opt;
pub mod report;
