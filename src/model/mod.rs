//! The parametric curve family and its inverse-mapping seed heuristic.
//!
//! The model is implemented as small, pure functions so that fitting/search
//! code can stay generic.

pub mod curve;

pub use curve::*;
