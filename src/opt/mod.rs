//! Bounded local minimizers.
//!
//! Two solvers, both deterministic and derivative-free at the API surface
//! (derivatives are estimated by finite differences internally):
//!
//! - `scalar`: safeguarded Newton descent for one-dimensional problems on a
//!   closed interval (used to re-solve the curve parameter `t` per point)
//! - `quasi_newton`: BFGS with projected backtracking line search for the
//!   outer `(theta, m, x0)` box-constrained search
//!
//! Neither solver treats non-convergence as an error: the best iterate found
//! is always returned, flagged accordingly.

pub mod quasi_newton;
pub mod scalar;

pub use quasi_newton::*;
pub use scalar::*;
