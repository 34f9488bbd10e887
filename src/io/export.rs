//! File exports: the LaTeX submission line and the optional JSON report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{CurveParams, FitReport};
use crate::error::AppError;
use crate::report::latex_parametric;

/// Write the one-line LaTeX submission for the fitted parameters.
///
/// Overwrites any existing file at `path`.
pub fn write_submission(path: &Path, params: &CurveParams) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    writeln!(file, "{}", latex_parametric(params))
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}

/// Write the machine-readable fit report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &FitReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))?;
    Ok(())
}
