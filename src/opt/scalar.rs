//! Bounded scalar minimization via safeguarded Newton descent.
//!
//! The per-point solver needs a *local* minimum of the squared point-to-curve
//! distance near a supplied seed, subject to `t ∈ [lo, hi]`. The distance
//! profile is oscillatory (the `sin(0.3t)` term creates many basins), so a
//! global search would be wrong here: the seed encodes which basin we want.
//!
//! Method: Newton steps from finite-difference first/second derivatives,
//! clamped into the interval, with backtracking halving until the objective
//! decreases. Falls back to a bounded gradient step where the local curvature
//! is non-convex. The best iterate is accepted even on non-convergence.

/// Result of a bounded scalar minimization.
#[derive(Debug, Clone, Copy)]
pub struct ScalarSolution {
    /// Best argument found (always inside the bounds).
    pub t: f64,
    /// Objective value at `t`.
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Safeguarded Newton minimizer on a closed interval.
#[derive(Debug, Clone, Copy)]
pub struct ScalarMinimizer {
    /// Convergence tolerance on the step size.
    pub tol: f64,
    pub max_iters: usize,
}

impl Default for ScalarMinimizer {
    fn default() -> Self {
        Self {
            tol: 1e-10,
            max_iters: 100,
        }
    }
}

/// Relative step used for finite-difference derivatives.
const FD_STEP: f64 = 1e-6;

/// Curvature below this is treated as non-convex (no usable Newton step).
const MIN_CURVATURE: f64 = 1e-12;

/// Maximum number of backtracking halvings per iteration.
const MAX_BACKTRACKS: usize = 40;

impl ScalarMinimizer {
    pub fn new(tol: f64, max_iters: usize) -> Self {
        Self { tol, max_iters }
    }

    /// Minimize `f` on `[lo, hi]` starting from `seed`.
    ///
    /// The seed is clamped into the interval first. A seed sitting on a bound
    /// with the derivative pointing outward converges immediately at that
    /// bound, matching the behavior of box-constrained descent methods.
    pub fn minimize<F>(&self, f: F, seed: f64, (lo, hi): (f64, f64)) -> ScalarSolution
    where
        F: Fn(f64) -> f64,
    {
        let span = hi - lo;
        let mut t = seed.clamp(lo, hi);
        let mut ft = f(t);

        for iter in 0..self.max_iters {
            let h = FD_STEP * t.abs().max(1.0);
            let (fp, fpp) = self.derivatives(&f, t, ft, h, lo, hi);

            // First-order optimality, including one-sided optimality at the
            // interval ends.
            let at_lo = t - lo <= h;
            let at_hi = hi - t <= h;
            if fp.abs() <= self.tol * (1.0 + ft.abs())
                || (at_lo && fp >= 0.0)
                || (at_hi && fp <= 0.0)
            {
                return ScalarSolution {
                    t,
                    value: ft,
                    iterations: iter,
                    converged: true,
                };
            }

            // Newton step where the curvature is usable, otherwise a bounded
            // descent step in the downhill direction.
            let mut dt = if fpp > MIN_CURVATURE {
                -fp / fpp
            } else {
                -fp.signum() * 0.1 * span
            };
            dt = dt.clamp(-0.5 * span, 0.5 * span);

            // Backtrack until we find a decrease inside the interval.
            let mut accepted = None;
            let mut alpha = 1.0;
            for _ in 0..MAX_BACKTRACKS {
                let tn = (t + alpha * dt).clamp(lo, hi);
                if tn != t {
                    let fn_ = f(tn);
                    if fn_.is_finite() && fn_ < ft {
                        accepted = Some((tn, fn_));
                        break;
                    }
                }
                alpha *= 0.5;
            }

            let Some((tn, fn_)) = accepted else {
                // No downhill step left at this resolution; accept the
                // current iterate as the local minimum.
                return ScalarSolution {
                    t,
                    value: ft,
                    iterations: iter,
                    converged: true,
                };
            };

            let step = (tn - t).abs();
            t = tn;
            ft = fn_;

            if step <= self.tol * (1.0 + t.abs()) {
                return ScalarSolution {
                    t,
                    value: ft,
                    iterations: iter + 1,
                    converged: true,
                };
            }
        }

        ScalarSolution {
            t,
            value: ft,
            iterations: self.max_iters,
            converged: false,
        }
    }

    /// Finite-difference first and second derivatives, switching to one-sided
    /// stencils near the interval ends.
    fn derivatives<F>(&self, f: &F, t: f64, ft: f64, h: f64, lo: f64, hi: f64) -> (f64, f64)
    where
        F: Fn(f64) -> f64,
    {
        if t - h < lo {
            let f1 = f(t + h);
            let f2 = f(t + 2.0 * h);
            ((f1 - ft) / h, (f2 - 2.0 * f1 + ft) / (h * h))
        } else if t + h > hi {
            let f1 = f(t - h);
            let f2 = f(t - 2.0 * h);
            ((ft - f1) / h, (f2 - 2.0 * f1 + ft) / (h * h))
        } else {
            let fp1 = f(t + h);
            let fm1 = f(t - h);
            ((fp1 - fm1) / (2.0 * h), (fp1 - 2.0 * ft + fm1) / (h * h))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimizes_shifted_quadratic() {
        let solver = ScalarMinimizer::default();
        let sol = solver.minimize(|t| (t - 3.0) * (t - 3.0), 1.0, (0.0, 10.0));
        assert!(sol.converged);
        assert!((sol.t - 3.0).abs() < 1e-6);
        assert!(sol.value < 1e-10);
    }

    #[test]
    fn stays_at_bound_when_gradient_points_outward() {
        // Minimum of (t-1)^2 on [2, 5] is at the lower bound.
        let solver = ScalarMinimizer::default();
        let sol = solver.minimize(|t| (t - 1.0) * (t - 1.0), 2.0, (2.0, 5.0));
        assert!(sol.converged);
        assert_eq!(sol.t, 2.0);
    }

    #[test]
    fn finds_local_minimum_near_seed_not_global() {
        // cos(t) on [0, 4π] has minima at π and 3π; the seed picks the basin.
        let solver = ScalarMinimizer::default();
        let pi = std::f64::consts::PI;

        let near_first = solver.minimize(|t| t.cos(), 2.5, (0.0, 4.0 * pi));
        assert!((near_first.t - pi).abs() < 1e-5);

        let near_second = solver.minimize(|t| t.cos(), 9.0, (0.0, 4.0 * pi));
        assert!((near_second.t - 3.0 * pi).abs() < 1e-5);
    }

    #[test]
    fn seed_outside_interval_is_clamped() {
        let solver = ScalarMinimizer::default();
        let sol = solver.minimize(|t| (t - 3.0) * (t - 3.0), -50.0, (0.0, 10.0));
        assert!((sol.t - 3.0).abs() < 1e-6);
    }

    #[test]
    fn handles_nonconvex_start() {
        // Start where f'' < 0 (between the humps of a double well).
        let solver = ScalarMinimizer::default();
        let f = |t: f64| (t * t - 1.0) * (t * t - 1.0);
        let sol = solver.minimize(f, 0.4, (-2.0, 2.0));
        assert!((sol.t.abs() - 1.0).abs() < 1e-5);
        assert!(sol.value < 1e-9);
    }
}
