//! Formatted output: the LaTeX submission string and terminal summaries.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{CurveParams, FitConfig, FitOutcome};
use crate::io::ingest::IngestedData;

/// Render the fitted curve as the one-line LaTeX parametric expression.
///
/// Theta and M are printed with 6 decimal places, X with 4. The template is
/// the exact string downstream graphing tools expect, so any change here is
/// an output-format change, not a cosmetic one.
pub fn latex_parametric(params: &CurveParams) -> String {
    let theta = format!("{:.6}", params.theta);
    let m = format!("{:.6}", params.m);
    let x0 = format!("{:.4}", params.x0);

    format!(
        "\\left(t\\cos({theta}) - e^{{{m}\\left|t\\right|}}\\sin(0.3t)\\sin({theta}) + {x0}, \
         42 + t\\sin({theta}) + e^{{{m}\\left|t\\right|}}\\sin(0.3t)\\cos({theta})\\right)"
    )
}

/// Format the run summary printed before fitting starts.
pub fn format_run_summary(ingest: &IngestedData, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== ribbon - Parametric Curve Fit ===\n");
    out.push_str(&format!("Input: {}\n", config.csv_path.display()));
    out.push_str(&format!("Objective: {}\n", config.objective.display_name()));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        ingest.stats.n_points,
        ingest.stats.x_min,
        ingest.stats.x_max,
        ingest.stats.y_min,
        ingest.stats.y_max
    ));
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!(
            "Skipped rows: {} of {} (first: line {}: {})\n",
            ingest.row_errors.len(),
            ingest.rows_read,
            ingest.row_errors[0].line,
            ingest.row_errors[0].message
        ));
    }
    out.push_str(&format!(
        "Init: theta={:.6} m={:.6} x0={:.4}\n",
        config.initial.theta, config.initial.m, config.initial.x0
    ));
    out.push_str(&format!(
        "Bounds: theta=[{:.6}, {:.6}] m=[{:.6}, {:.6}] x0=[{:.4}, {:.4}]\n",
        config.bounds.theta.0,
        config.bounds.theta.1,
        config.bounds.m.0,
        config.bounds.m.1,
        config.bounds.x0.0,
        config.bounds.x0.1
    ));
    out.push_str(&format!(
        "Tolerance: ftol={:e} | max evals: {}\n",
        config.ftol, config.max_evals
    ));

    out
}

/// Format the fit result block (parameters + diagnostics + LaTeX line).
pub fn format_result(outcome: &FitOutcome) -> String {
    let mut out = String::new();

    out.push_str("\nFitted parameters:\n");
    out.push_str(&format!(
        "- theta = {:.6} rad ({:.4} deg)\n",
        outcome.params.theta,
        outcome.params.theta_degrees()
    ));
    out.push_str(&format!("- M     = {:.6}\n", outcome.params.m));
    out.push_str(&format!("- X     = {:.4}\n", outcome.params.x0));
    out.push_str(&format!("- loss  = {:.6}\n", outcome.loss));
    out.push_str(&format!(
        "- evals = {} | iterations = {} | converged = {}\n",
        outcome.evals, outcome.iterations, outcome.converged
    ));

    out.push_str("\n=== LaTeX output ===\n");
    out.push_str(&latex_parametric(&outcome.params));
    out.push('\n');

    out
}
