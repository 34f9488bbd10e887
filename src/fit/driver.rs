//! Outer search driver: wire a loss to the box-constrained optimizer.

use crate::domain::{CurveParams, FitConfig, FitOutcome, Observation, ObjectiveKind};
use crate::error::AppError;
use crate::fit::objective::{GridEuclidean, Loss, TotalL1};
use crate::opt::BoxQuasiNewton;

/// Minimize the configured global loss over `(theta, m, x0)`.
///
/// Non-convergence within the evaluation budget is reported via the outcome
/// flag, never as an error.
pub fn run_fit(observations: &[Observation], config: &FitConfig) -> Result<FitOutcome, AppError> {
    if observations.is_empty() {
        return Err(AppError::new(3, "No data points to fit."));
    }
    if !(config.ftol.is_finite() && config.ftol > 0.0) {
        return Err(AppError::new(2, "Invalid ftol setting (must be finite and > 0)."));
    }
    if config.max_evals == 0 {
        return Err(AppError::new(2, "Invalid max-evals setting (must be > 0)."));
    }

    let outcome = match config.objective {
        ObjectiveKind::TotalL1 => minimize(&TotalL1::new(observations), config),
        ObjectiveKind::GridEuclidean => minimize(&GridEuclidean::new(observations), config),
    };

    if !outcome.loss.is_finite() {
        return Err(AppError::new(
            4,
            format!("Non-finite loss at the reported optimum ({}).", config.objective.display_name()),
        ));
    }

    Ok(outcome)
}

fn minimize(loss: &dyn Loss, config: &FitConfig) -> FitOutcome {
    let optimizer = BoxQuasiNewton::new(config.ftol, config.max_evals);
    let (lo, hi) = config.bounds.to_arrays();
    let start = config.bounds.clamp(config.initial);

    let sol = optimizer.minimize(
        |v| loss.evaluate(&CurveParams::from_array(*v)),
        start.to_array(),
        lo,
        hi,
    );

    FitOutcome {
        params: CurveParams::from_array(sol.x),
        loss: sol.value,
        evals: sol.evals,
        iterations: sol.iterations,
        converged: sol.converged,
    }
}
