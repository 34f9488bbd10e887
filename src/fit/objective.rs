//! The two swappable global losses driving the outer search.
//!
//! Both evaluate the same shared curve model; they differ only in how each
//! observation's curve parameter `t` is chosen:
//!
//! - `TotalL1` re-solves `t` per observation (seeded local minimization) and
//!   sums L1 coordinate distances. Accurate but O(N) inner solves per call.
//! - `GridEuclidean` pairs observations with a fixed uniform `t` grid in file
//!   order and averages Euclidean distances. Cheap, but materially less
//!   accurate when the file order does not follow increasing `t` (known
//!   limitation, preserved as-is).

use crate::domain::{CurveParams, Observation};
use crate::fit::grid::uniform_t_grid;
use crate::fit::per_point::best_t_for_point;
use crate::model::{curve, curve_many, seed_guesses};
use crate::opt::ScalarMinimizer;

/// A global loss over the observation set for candidate curve parameters.
pub trait Loss {
    fn evaluate(&self, p: &CurveParams) -> f64;

    /// Label for terminal output.
    fn name(&self) -> &'static str;
}

/// Total L1 distance after per-point `t` re-solve.
pub struct TotalL1<'a> {
    observations: &'a [Observation],
    solver: ScalarMinimizer,
}

impl<'a> TotalL1<'a> {
    pub fn new(observations: &'a [Observation]) -> Self {
        Self {
            observations,
            solver: ScalarMinimizer::default(),
        }
    }
}

impl Loss for TotalL1<'_> {
    fn evaluate(&self, p: &CurveParams) -> f64 {
        // Seeds are derived once per evaluation and shared across points;
        // the solved t values are not persisted between evaluations.
        let seeds = seed_guesses(self.observations, p);

        let mut total = 0.0;
        for (obs, &seed) in self.observations.iter().zip(seeds.iter()) {
            let t_star = best_t_for_point(obs, p, seed, &self.solver);
            let (x_pred, y_pred) = curve(t_star, p);
            total += (x_pred - obs.x).abs() + (y_pred - obs.y).abs();
        }
        total
    }

    fn name(&self) -> &'static str {
        "total_l1"
    }
}

/// Mean Euclidean distance over a fixed uniform `t` grid (ordered pairing).
pub struct GridEuclidean<'a> {
    observations: &'a [Observation],
    grid: Vec<f64>,
}

impl<'a> GridEuclidean<'a> {
    pub fn new(observations: &'a [Observation]) -> Self {
        Self {
            observations,
            grid: uniform_t_grid(observations.len()),
        }
    }
}

impl Loss for GridEuclidean<'_> {
    fn evaluate(&self, p: &CurveParams) -> f64 {
        let (xs, ys) = curve_many(&self.grid, p);

        let mut total = 0.0;
        for (i, obs) in self.observations.iter().enumerate() {
            let dx = xs[i] - obs.x;
            let dy = ys[i] - obs.y;
            total += (dx * dx + dy * dy).sqrt();
        }
        total / self.observations.len() as f64
    }

    fn name(&self) -> &'static str {
        "grid_euclidean"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{T_MAX, T_MIN};
    use crate::fit::grid::lin_space;

    #[test]
    fn total_l1_is_zero_for_on_curve_points() {
        let p = CurveParams::new(0.8, 0.07, 11.0);
        let ts = [8.0, 14.5, 21.0];
        let observations: Vec<Observation> = ts
            .iter()
            .map(|&t| {
                let (x, y) = curve(t, &p);
                Observation { x, y }
            })
            .collect();

        let loss = TotalL1::new(&observations);
        // Exact-fit points may still sit in a different basin than their
        // seed; these mid-range t values are chosen so the seeds land in the
        // right basin and residuals vanish.
        assert!(loss.evaluate(&p) < 1e-4);
    }

    #[test]
    fn total_l1_matches_pinned_reference() {
        // End-to-end wiring check for the whole loss pipeline: reference
        // value computed once with high-accuracy per-point solves and pinned.
        let observations = [
            Observation { x: 11.58, y: 42.0 },
            Observation { x: 20.0, y: 50.0 },
            Observation { x: 30.0, y: 55.0 },
        ];
        let p = CurveParams::new(0.826, 0.0742, 11.58);

        let loss = TotalL1::new(&observations);
        let value = loss.evaluate(&p);
        assert!(
            (value - 12.383434).abs() < 1e-3,
            "total_l1 = {value}, expected ~12.383434"
        );
    }

    #[test]
    fn grid_euclidean_is_zero_on_exact_grid_data() {
        let truth = CurveParams::new(0.8, 0.075, 20.0);
        let grid = lin_space(T_MIN, T_MAX, 25);
        let observations: Vec<Observation> = grid
            .iter()
            .map(|&t| {
                let (x, y) = curve(t, &truth);
                Observation { x, y }
            })
            .collect();

        let loss = GridEuclidean::new(&observations);
        assert!(loss.evaluate(&truth) < 1e-12);

        // Perturbing the parameters must strictly increase the loss.
        let off = CurveParams::new(0.82, 0.075, 20.0);
        assert!(loss.evaluate(&off) > 1e-3);
    }

    #[test]
    fn grid_euclidean_depends_on_observation_order() {
        // Ordered pairing, not nearest-point matching: reversing the
        // observations changes the loss.
        let truth = CurveParams::new(0.8, 0.075, 20.0);
        let grid = lin_space(T_MIN, T_MAX, 10);
        let mut observations: Vec<Observation> = grid
            .iter()
            .map(|&t| {
                let (x, y) = curve(t, &truth);
                Observation { x, y }
            })
            .collect();

        let loss = GridEuclidean::new(&observations);
        let forward = loss.evaluate(&truth);

        observations.reverse();
        let loss_rev = GridEuclidean::new(&observations);
        let backward = loss_rev.evaluate(&truth);

        assert!(forward < 1e-12);
        assert!(backward > 1.0);
    }
}
