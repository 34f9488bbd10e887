//! Curve evaluation for the fitted parametric family.
//!
//! ```text
//! x(t) = t·cos θ − e^{M|t|}·sin(0.3t)·sin θ + X
//! y(t) = 42 + t·sin θ + e^{M|t|}·sin(0.3t)·cos θ
//! ```
//!
//! Numerical notes:
//! - The function is pure and continuous in all four arguments; there is no
//!   branch logic that could introduce discontinuities.
//! - `e^{M|t|}` can overflow for extreme `M·|t|`. This is an accepted risk:
//!   non-finite values propagate into the loss and are rejected by the
//!   optimizer's line search rather than crashing the run.

use crate::domain::{CurveParams, Observation, T_MAX, T_MIN, Y_BASE};

/// Frequency of the oscillatory term `sin(0.3t)`.
const OSC_FREQ: f64 = 0.3;

/// Guard against division by zero in the cos-based seed formula.
const SEED_EPS: f64 = 1e-8;

/// Evaluate the curve at a single `t`, returning `(x, y)`.
pub fn curve(t: f64, p: &CurveParams) -> (f64, f64) {
    let (sin_t, cos_t) = p.theta.sin_cos();
    let swell = (p.m * t.abs()).exp() * (OSC_FREQ * t).sin();

    let x = t * cos_t - swell * sin_t + p.x0;
    let y = Y_BASE + t * sin_t + swell * cos_t;
    (x, y)
}

/// Evaluate the curve elementwise over a slice of `t` values.
///
/// Both global losses call the model with arrays; this keeps the hot loop in
/// one place and the trig of theta computed once.
pub fn curve_many(ts: &[f64], p: &CurveParams) -> (Vec<f64>, Vec<f64>) {
    let (sin_t, cos_t) = p.theta.sin_cos();
    let mut xs = Vec::with_capacity(ts.len());
    let mut ys = Vec::with_capacity(ts.len());

    for &t in ts {
        let swell = (p.m * t.abs()).exp() * (OSC_FREQ * t).sin();
        xs.push(t * cos_t - swell * sin_t + p.x0);
        ys.push(Y_BASE + t * sin_t + swell * cos_t);
    }
    (xs, ys)
}

/// Derive an initial `t` seed for every observation.
///
/// Performed once per outer-loss evaluation and shared across points:
/// ignoring the oscillatory term, `y ≈ 42 + t·sin θ`, so when `|sin θ|` is
/// comfortably away from zero the seed inverts the y-coordinate; otherwise
/// the x-coordinate (`x ≈ t·cos θ + X`) is inverted instead. Seeds are
/// clamped into `[T_MIN, T_MAX]`.
pub fn seed_guesses(observations: &[Observation], p: &CurveParams) -> Vec<f64> {
    let sin_t = p.theta.sin();
    let cos_t = p.theta.cos();

    observations
        .iter()
        .map(|obs| {
            let raw = if sin_t.abs() > 0.1 {
                (obs.y - Y_BASE) / sin_t
            } else {
                (obs.x - p.x0) / (cos_t + SEED_EPS)
            };
            raw.clamp(T_MIN, T_MAX)
        })
        .collect()
}
