//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - re-solve the curve parameter `t` per observation (`per_point`)
//! - build the uniform `t` grid for the fast objective (`grid`)
//! - expose the two swappable global losses (`objective`)
//! - drive the outer box-constrained search (`driver`)

pub mod driver;
pub mod grid;
pub mod objective;
pub mod per_point;

pub use driver::*;
pub use grid::*;
pub use objective::*;
pub use per_point::*;
