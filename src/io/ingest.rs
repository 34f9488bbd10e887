//! CSV ingest and normalization.
//!
//! This module turns a tabular `(x, y)` file into a clean observation list
//! that is safe to fit.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (file order is preserved; it matters for the
//!   fixed-grid objective's ordered pairing)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Observation;
use crate::error::AppError;

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: ordered observations + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub observations: Vec<Observation>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load and validate observations from a CSV file.
pub fn load_observations(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_observations(file)
}

/// Ingest observations from any reader (factored out for testability).
pub fn read_observations<R: std::io::Read>(reader: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    for required in ["x", "y"] {
        if !header_map.contains_key(required) {
            return Err(AppError::new(2, format!("Missing required column: `{required}`")));
        }
    }

    let mut observations = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2 because records() starts after the header row and CSV line
        // numbers are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map) {
            Ok(obs) => observations.push(obs),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = observations.len();
    let stats = compute_stats(&observations)
        .ok_or_else(|| AppError::new(3, "No valid rows remain after validation."))?;

    Ok(IngestedData {
        observations,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header. If we don't strip it, schema validation incorrectly
    // reports the `x` column as missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Observation, String> {
    let x = parse_f64(record, header_map, "x")?;
    let y = parse_f64(record, header_map, "y")?;
    Ok(Observation { x, y })
}

fn parse_f64(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<f64, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    let raw = record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))?;

    let v: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid `{name}` value '{raw}' (expected a number)."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite `{name}` value."));
    }
    Ok(v)
}

fn compute_stats(observations: &[Observation]) -> Option<DatasetStats> {
    if observations.is_empty() {
        return None;
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for obs in observations {
        x_min = x_min.min(obs.x);
        x_max = x_max.max(obs.x);
        y_min = y_min.min(obs.y);
        y_max = y_max.max(obs.y);
    }

    Some(DatasetStats {
        n_points: observations.len(),
        x_min,
        x_max,
        y_min,
        y_max,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_well_formed_csv() {
        let data = "x,y\n11.58,42\n20,50\n30,55\n";
        let ingest = read_observations(Cursor::new(data)).unwrap();

        assert_eq!(ingest.rows_read, 3);
        assert_eq!(ingest.rows_used, 3);
        assert!(ingest.row_errors.is_empty());
        assert_eq!(ingest.observations[0], Observation { x: 11.58, y: 42.0 });
        assert_eq!(ingest.stats.n_points, 3);
        assert!((ingest.stats.x_min - 11.58).abs() < 1e-12);
        assert!((ingest.stats.y_max - 55.0).abs() < 1e-12);
    }

    #[test]
    fn preserves_file_order() {
        let data = "x,y\n30,55\n11.58,42\n20,50\n";
        let ingest = read_observations(Cursor::new(data)).unwrap();
        let xs: Vec<f64> = ingest.observations.iter().map(|o| o.x).collect();
        assert_eq!(xs, vec![30.0, 11.58, 20.0]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let data = "x,z\n1,2\n";
        let err = read_observations(Cursor::new(data)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let data = "x,y\n1,2\nnot_a_number,3\n4,\n5,6\n";
        let ingest = read_observations(Cursor::new(data)).unwrap();

        assert_eq!(ingest.rows_read, 4);
        assert_eq!(ingest.rows_used, 2);
        assert_eq!(ingest.row_errors.len(), 2);
        assert_eq!(ingest.row_errors[0].line, 3);
        assert_eq!(ingest.row_errors[1].line, 4);
    }

    #[test]
    fn all_rows_invalid_is_fatal() {
        let data = "x,y\nfoo,bar\n";
        let err = read_observations(Cursor::new(data)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn bom_and_case_in_headers_are_normalized() {
        let data = "\u{feff}X,Y\n1,2\n";
        let ingest = read_observations(Cursor::new(data)).unwrap();
        assert_eq!(ingest.rows_used, 1);
    }

    #[test]
    fn non_finite_values_are_row_errors() {
        let data = "x,y\nNaN,2\ninf,3\n1,2\n";
        let ingest = read_observations(Cursor::new(data)).unwrap();
        assert_eq!(ingest.rows_used, 1);
        assert_eq!(ingest.row_errors.len(), 2);
    }
}
