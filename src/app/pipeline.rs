//! Shared fit pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> fit -> report
//!
//! The CLI layer can then focus on presentation and file exports.

use crate::domain::{FitConfig, FitOutcome, FitReport};
use crate::error::AppError;
use crate::io::ingest::{self, IngestedData};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub outcome: FitOutcome,
    pub report: FitReport,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run(config: &FitConfig) -> Result<RunOutput, AppError> {
    // 1) Ingest and validate.
    let ingest = ingest::load_observations(&config.csv_path)?;

    // 2) Fit.
    let outcome = crate::fit::run_fit(&ingest.observations, config)?;

    // 3) Build the machine-readable report.
    let report = FitReport::new(config.objective, &outcome, ingest.stats.n_points);

    Ok(RunOutput {
        ingest,
        outcome,
        report,
    })
}
