//! Command-line parsing for the parametric curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ribbon", version, about = "Parametric ribbon-curve fitter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Accurate fit: per-point t re-solve with a total L1 objective.
    ///
    /// Writes the LaTeX submission line to the output file.
    Fit(FitArgs),
    /// Quick fit: fixed t grid paired with observations in file order,
    /// mean Euclidean objective. Fast, but sensitive to row ordering.
    Quick(FitArgs),
}

/// Common options for both pipelines.
///
/// The initial-guess flags default differently per pipeline, so they are
/// optional here and resolved in the app layer.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Input CSV with `x` and `y` columns.
    #[arg(short = 'i', long, default_value = "xy_data.csv")]
    pub input: PathBuf,

    /// Output file for the LaTeX submission line (fit pipeline only).
    #[arg(short = 'o', long, default_value = "submission.txt")]
    pub output: PathBuf,

    /// Initial tilt angle theta (radians).
    #[arg(long)]
    pub theta0: Option<f64>,

    /// Initial growth rate M.
    #[arg(long)]
    pub m0: Option<f64>,

    /// Initial horizontal offset X.
    #[arg(long)]
    pub x00: Option<f64>,

    /// Relative function-decrease tolerance for the outer optimizer.
    #[arg(long, default_value_t = 1e-12)]
    pub ftol: f64,

    /// Maximum objective evaluations for the outer optimizer.
    #[arg(long, default_value_t = 5000)]
    pub max_evals: usize,

    /// Export a machine-readable fit report to JSON.
    #[arg(long = "export-report")]
    pub export_report: Option<PathBuf>,
}
