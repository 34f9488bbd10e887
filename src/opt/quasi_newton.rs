//! Box-constrained quasi-Newton minimization for the outer parameter search.
//!
//! BFGS on the inverse Hessian with:
//!
//! - finite-difference gradients that switch to one-sided stencils at the box
//!   faces (the objective is never evaluated outside the bounds)
//! - a projected backtracking (Armijo) line search
//! - gradient projection at active bounds, with an identity reset whenever
//!   the BFGS direction stops being a descent direction
//!
//! Termination mirrors bounded quasi-Newton library conventions: relative
//! function-value decrease below `ftol`, projected-gradient norm below
//! `pgtol`, or the evaluation budget. The best iterate is reported either
//! way; `converged` records which case fired.

use nalgebra::{Matrix3, Vector3};

/// Result of a box-constrained minimization over three parameters.
#[derive(Debug, Clone, Copy)]
pub struct OuterSolution {
    /// Best parameter vector found (always inside the box).
    pub x: [f64; 3],
    pub value: f64,
    /// Total objective evaluations, including those spent on gradients.
    pub evals: usize,
    pub iterations: usize,
    pub converged: bool,
}

/// BFGS minimizer over a three-dimensional box.
#[derive(Debug, Clone, Copy)]
pub struct BoxQuasiNewton {
    /// Relative function-decrease tolerance.
    pub ftol: f64,
    /// Projected-gradient infinity-norm tolerance.
    pub pgtol: f64,
    /// Cap on total objective evaluations.
    pub max_evals: usize,
    pub max_iters: usize,
}

impl Default for BoxQuasiNewton {
    fn default() -> Self {
        Self {
            ftol: 1e-12,
            pgtol: 1e-8,
            max_evals: 5_000,
            max_iters: 500,
        }
    }
}

/// Relative step for finite-difference gradients.
const FD_STEP: f64 = 1e-7;

/// Armijo sufficient-decrease constant.
const ARMIJO_C1: f64 = 1e-4;

/// Maximum backtracking halvings per line search.
const MAX_BACKTRACKS: usize = 40;

/// Curvature threshold below which the BFGS update is skipped.
const MIN_CURVATURE: f64 = 1e-12;

impl BoxQuasiNewton {
    pub fn new(ftol: f64, max_evals: usize) -> Self {
        Self {
            ftol,
            max_evals,
            ..Self::default()
        }
    }

    /// Minimize `f` over the box `[lo, hi]` starting from `x0`.
    ///
    /// `x0` is clamped into the box before the first evaluation.
    pub fn minimize<F>(&self, mut f: F, x0: [f64; 3], lo: [f64; 3], hi: [f64; 3]) -> OuterSolution
    where
        F: FnMut(&[f64; 3]) -> f64,
    {
        let lo = Vector3::from(lo);
        let hi = Vector3::from(hi);

        let mut evals = 0usize;
        let mut eval = |x: &Vector3<f64>, evals: &mut usize| {
            *evals += 1;
            f(&[x[0], x[1], x[2]])
        };

        let mut x = clamp(Vector3::from(x0), &lo, &hi);
        let mut fx = eval(&x, &mut evals);
        let mut h_inv = Matrix3::identity();

        let mut g = self.gradient(&mut eval, &x, fx, &lo, &hi, &mut evals);
        let mut converged = false;
        let mut iterations = 0usize;

        for iter in 0..self.max_iters {
            iterations = iter;

            if projected_gradient_norm(&x, &g, &lo, &hi) <= self.pgtol {
                converged = true;
                break;
            }
            if evals >= self.max_evals {
                break;
            }

            // Quasi-Newton direction, projected at active bounds. If the
            // curvature model has gone stale and the direction is uphill,
            // fall back to projected steepest descent.
            let mut d = project_direction(-(h_inv * g), &x, &lo, &hi);
            if d.dot(&g) >= -MIN_CURVATURE {
                h_inv = Matrix3::identity();
                d = project_direction(-g, &x, &lo, &hi);
            }
            if d.norm() == 0.0 {
                converged = true;
                break;
            }

            // Projected backtracking line search.
            let mut accepted = None;
            let mut alpha = 1.0;
            for _ in 0..MAX_BACKTRACKS {
                let xn = clamp(x + alpha * d, &lo, &hi);
                let step = xn - x;
                if step.norm() > 0.0 {
                    let fn_ = eval(&xn, &mut evals);
                    if fn_.is_finite() && fn_ <= fx + ARMIJO_C1 * g.dot(&step) {
                        accepted = Some((xn, fn_));
                        break;
                    }
                    if evals >= self.max_evals {
                        break;
                    }
                }
                alpha *= 0.5;
            }

            let Some((xn, fn_)) = accepted else {
                // No acceptable downhill step: either the budget ran out
                // mid-search, or we are at a local minimum to within
                // line-search resolution.
                converged = evals < self.max_evals;
                break;
            };

            let decrease = fx - fn_;
            let g_new = self.gradient(&mut eval, &xn, fn_, &lo, &hi, &mut evals);

            // BFGS inverse-Hessian update (skipped when the curvature
            // condition fails, which would break positive-definiteness).
            let s = xn - x;
            let yv = g_new - g;
            let sy = s.dot(&yv);
            if sy > MIN_CURVATURE {
                let rho = 1.0 / sy;
                let i = Matrix3::identity();
                let left = i - rho * s * yv.transpose();
                let right = i - rho * yv * s.transpose();
                h_inv = left * h_inv * right + rho * s * s.transpose();
            } else {
                h_inv = Matrix3::identity();
            }

            x = xn;
            fx = fn_;
            g = g_new;

            if decrease <= self.ftol * fx.abs().max(1.0) {
                converged = true;
                break;
            }
        }

        OuterSolution {
            x: [x[0], x[1], x[2]],
            value: fx,
            evals,
            iterations,
            converged,
        }
    }

    /// Finite-difference gradient that never steps outside the box.
    fn gradient<E>(
        &self,
        eval: &mut E,
        x: &Vector3<f64>,
        fx: f64,
        lo: &Vector3<f64>,
        hi: &Vector3<f64>,
        evals: &mut usize,
    ) -> Vector3<f64>
    where
        E: FnMut(&Vector3<f64>, &mut usize) -> f64,
    {
        let mut g = Vector3::zeros();
        for i in 0..3 {
            let h = FD_STEP * x[i].abs().max(1.0);
            let room_up = hi[i] - x[i] >= h;
            let room_down = x[i] - lo[i] >= h;

            g[i] = if room_up && room_down {
                let mut xp = *x;
                xp[i] += h;
                let mut xm = *x;
                xm[i] -= h;
                (eval(&xp, evals) - eval(&xm, evals)) / (2.0 * h)
            } else if room_up {
                let mut xp = *x;
                xp[i] += h;
                (eval(&xp, evals) - fx) / h
            } else {
                let mut xm = *x;
                xm[i] -= h;
                (fx - eval(&xm, evals)) / h
            };
        }
        g
    }
}

fn clamp(x: Vector3<f64>, lo: &Vector3<f64>, hi: &Vector3<f64>) -> Vector3<f64> {
    Vector3::new(
        x[0].clamp(lo[0], hi[0]),
        x[1].clamp(lo[1], hi[1]),
        x[2].clamp(lo[2], hi[2]),
    )
}

/// Zero direction components that would immediately push an active variable
/// out of the box.
fn project_direction(
    mut d: Vector3<f64>,
    x: &Vector3<f64>,
    lo: &Vector3<f64>,
    hi: &Vector3<f64>,
) -> Vector3<f64> {
    for i in 0..3 {
        if (x[i] <= lo[i] && d[i] < 0.0) || (x[i] >= hi[i] && d[i] > 0.0) {
            d[i] = 0.0;
        }
    }
    d
}

/// Infinity norm of the gradient projected onto the feasible directions.
fn projected_gradient_norm(
    x: &Vector3<f64>,
    g: &Vector3<f64>,
    lo: &Vector3<f64>,
    hi: &Vector3<f64>,
) -> f64 {
    let d = project_direction(-*g, x, lo, hi);
    d.abs().max()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_interior_quadratic_minimum() {
        let solver = BoxQuasiNewton::default();
        let sol = solver.minimize(
            |x| (x[0] - 1.0).powi(2) + 2.0 * (x[1] + 0.5).powi(2) + (x[2] - 3.0).powi(2),
            [0.0, 0.0, 0.0],
            [-5.0, -5.0, -5.0],
            [5.0, 5.0, 5.0],
        );
        assert!(sol.converged);
        assert!((sol.x[0] - 1.0).abs() < 1e-5);
        assert!((sol.x[1] + 0.5).abs() < 1e-5);
        assert!((sol.x[2] - 3.0).abs() < 1e-5);
        assert!(sol.value < 1e-9);
    }

    #[test]
    fn respects_active_bounds() {
        // Unconstrained minimum (10, 10, 10) lies outside the box.
        let solver = BoxQuasiNewton::default();
        let sol = solver.minimize(
            |x| {
                (x[0] - 10.0).powi(2) + (x[1] - 10.0).powi(2) + (x[2] - 10.0).powi(2)
            },
            [0.0, 0.0, 0.0],
            [-1.0, -1.0, -1.0],
            [1.0, 2.0, 3.0],
        );
        assert!((sol.x[0] - 1.0).abs() < 1e-8);
        assert!((sol.x[1] - 2.0).abs() < 1e-8);
        assert!((sol.x[2] - 3.0).abs() < 1e-8);
    }

    #[test]
    fn honors_evaluation_budget() {
        let solver = BoxQuasiNewton {
            max_evals: 25,
            ..Default::default()
        };
        let sol = solver.minimize(
            |x| {
                // Narrow valley to force many iterations.
                100.0 * (x[1] - x[0] * x[0]).powi(2) + (1.0 - x[0]).powi(2) + x[2] * x[2]
            },
            [-1.2, 1.0, 0.5],
            [-2.0, -2.0, -2.0],
            [2.0, 2.0, 2.0],
        );
        // Budget may be overshot by at most one gradient stencil.
        assert!(sol.evals <= 25 + 7);
    }

    #[test]
    fn start_outside_box_is_clamped() {
        let solver = BoxQuasiNewton::default();
        let sol = solver.minimize(
            |x| x[0] * x[0] + x[1] * x[1] + x[2] * x[2],
            [9.0, -9.0, 9.0],
            [-1.0, -1.0, -1.0],
            [1.0, 1.0, 1.0],
        );
        assert!(sol.value < 1e-8);
    }
}
