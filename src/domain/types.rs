//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON for downstream scripts
//! - reloaded later for plotting or comparisons

use std::f64::consts::PI;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Lower bound of the curve parameter `t`.
pub const T_MIN: f64 = 6.0;
/// Upper bound of the curve parameter `t`.
pub const T_MAX: f64 = 60.0;
/// Vertical offset baked into the curve family: `y(0) = Y_BASE`.
pub const Y_BASE: f64 = 42.0;

/// One observed `(x, y)` point. Loaded once, immutable for the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub x: f64,
    pub y: f64,
}

/// The three fitted shape parameters of the curve.
///
/// - `theta`: rotation angle in radians
/// - `m`: exponential growth-rate coefficient
/// - `x0`: horizontal offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub theta: f64,
    pub m: f64,
    pub x0: f64,
}

impl CurveParams {
    pub fn new(theta: f64, m: f64, x0: f64) -> Self {
        Self { theta, m, x0 }
    }

    /// View as a fixed-size array in optimizer order `[theta, m, x0]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.theta, self.m, self.x0]
    }

    pub fn from_array(v: [f64; 3]) -> Self {
        Self {
            theta: v[0],
            m: v[1],
            x0: v[2],
        }
    }

    pub fn theta_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }
}

/// Box constraints for the outer `(theta, m, x0)` search.
///
/// Each bound is `(lo, hi)` with `lo <= hi`. The outer optimizer never
/// evaluates the loss outside these boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub theta: (f64, f64),
    pub m: (f64, f64),
    pub x0: (f64, f64),
}

impl ParamBounds {
    /// Bounds used by the per-point (total L1) objective.
    ///
    /// Theta is bounded to 0.1°..50° expressed in radians.
    pub fn per_point() -> Self {
        Self {
            theta: (0.1 * PI / 180.0, 50.0 * PI / 180.0),
            m: (0.06, 0.09),
            x0: (5.0, 20.0),
        }
    }

    /// Bounds used by the fixed-grid (mean Euclidean) objective.
    pub fn grid() -> Self {
        Self {
            theta: (0.7, 0.9),
            m: (0.06, 0.09),
            x0: (15.0, 25.0),
        }
    }

    /// Per-component bounds in optimizer order.
    pub fn to_arrays(self) -> ([f64; 3], [f64; 3]) {
        (
            [self.theta.0, self.m.0, self.x0.0],
            [self.theta.1, self.m.1, self.x0.1],
        )
    }

    pub fn contains(&self, p: &CurveParams) -> bool {
        let (lo, hi) = self.to_arrays();
        p.to_array()
            .iter()
            .zip(lo.iter().zip(hi.iter()))
            .all(|(v, (l, h))| *v >= *l && *v <= *h)
    }

    /// Clamp a parameter vector into the box.
    pub fn clamp(&self, p: CurveParams) -> CurveParams {
        let (lo, hi) = self.to_arrays();
        let v = p.to_array();
        CurveParams::from_array([
            v[0].clamp(lo[0], hi[0]),
            v[1].clamp(lo[1], hi[1]),
            v[2].clamp(lo[2], hi[2]),
        ])
    }
}

/// Which global loss drives the outer search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    /// Per-point t re-solve, total L1 distance (accurate, slow).
    TotalL1,
    /// Fixed uniform t grid, ordered pairing, mean Euclidean distance
    /// (fast approximate fallback).
    GridEuclidean,
}

impl ObjectiveKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ObjectiveKind::TotalL1 => "total L1 (per-point t)",
            ObjectiveKind::GridEuclidean => "mean Euclidean (fixed grid)",
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub csv_path: PathBuf,
    pub objective: ObjectiveKind,
    pub initial: CurveParams,
    pub bounds: ParamBounds,

    /// Convergence tolerance on relative function-value decrease.
    pub ftol: f64,
    /// Cap on total loss evaluations in the outer search.
    pub max_evals: usize,

    /// Where to write the one-line LaTeX output (per-point pipeline only).
    pub output_path: Option<PathBuf>,
    /// Optional JSON report export.
    pub export_report: Option<PathBuf>,
}

/// Terminal state of the outer optimization.
///
/// Non-convergence within the evaluation budget is not an error: the best
/// iterate found is reported with `converged = false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitOutcome {
    pub params: CurveParams,
    pub loss: f64,
    pub evals: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// A portable summary of a run, exported as JSON on request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub tool: String,
    pub objective: ObjectiveKind,
    pub theta: f64,
    pub theta_degrees: f64,
    pub m: f64,
    pub x0: f64,
    pub loss: f64,
    pub converged: bool,
    pub n_points: usize,
}

impl FitReport {
    pub fn new(objective: ObjectiveKind, outcome: &FitOutcome, n_points: usize) -> Self {
        Self {
            tool: "ribbon".to_string(),
            objective,
            theta: outcome.params.theta,
            theta_degrees: outcome.params.theta_degrees(),
            m: outcome.params.m,
            x0: outcome.params.x0,
            loss: outcome.loss,
            converged: outcome.converged,
            n_points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_clamp_and_contains() {
        let bounds = ParamBounds::grid();
        let inside = CurveParams::new(0.8, 0.075, 20.0);
        assert!(bounds.contains(&inside));
        assert_eq!(bounds.clamp(inside), inside);

        let outside = CurveParams::new(1.5, 0.05, 30.0);
        assert!(!bounds.contains(&outside));
        let clamped = bounds.clamp(outside);
        assert!(bounds.contains(&clamped));
        assert_eq!(clamped, CurveParams::new(0.9, 0.06, 25.0));
    }

    #[test]
    fn per_point_theta_bounds_are_radians() {
        let bounds = ParamBounds::per_point();
        assert!((bounds.theta.0 - 0.1_f64.to_radians()).abs() < 1e-15);
        assert!((bounds.theta.1 - 50.0_f64.to_radians()).abs() < 1e-15);
    }

    #[test]
    fn params_array_round_trip() {
        let p = CurveParams::new(0.826, 0.0742, 11.58);
        assert_eq!(CurveParams::from_array(p.to_array()), p);
    }
}
