//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the observed data points (`Observation`)
//! - the fitted curve parameters and their box constraints
//!   (`CurveParams`, `ParamBounds`)
//! - run configuration derived from CLI flags (`FitConfig`)
//! - fit outputs (`FitOutcome`, `FitReport`)

pub mod types;

pub use types::*;
