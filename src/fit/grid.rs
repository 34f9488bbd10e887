//! Uniform `t` grid generation for the fixed-grid objective.
//!
//! The fast pipeline pairs the i-th grid point with the i-th observation in
//! file order. No correspondence between observation order and increasing `t`
//! is verified; this ordered-pairing assumption is a known limitation of the
//! approximate objective and is preserved as-is.

use crate::domain::{T_MAX, T_MIN};

/// Generate `n` evenly spaced points between `min` and `max` (inclusive).
///
/// `n = 1` yields `[min]`, matching common linspace semantics.
pub fn lin_space(min: f64, max: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![min];
    }

    let step = (max - min) / (n as f64 - 1.0);
    (0..n).map(|i| min + step * i as f64).collect()
}

/// The fixed grid over `[T_MIN, T_MAX]` used by the mean-Euclidean objective.
pub fn uniform_t_grid(n: usize) -> Vec<f64> {
    lin_space(T_MIN, T_MAX, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lin_space_includes_endpoints() {
        let v = lin_space(6.0, 60.0, 10);
        assert_eq!(v.len(), 10);
        assert!((v[0] - 6.0).abs() < 1e-12);
        assert!((v[9] - 60.0).abs() < 1e-12);
    }

    #[test]
    fn lin_space_is_evenly_spaced() {
        let v = lin_space(0.0, 1.0, 5);
        for w in v.windows(2) {
            assert!((w[1] - w[0] - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn lin_space_degenerate_lengths() {
        assert!(lin_space(6.0, 60.0, 0).is_empty());
        assert_eq!(lin_space(6.0, 60.0, 1), vec![6.0]);
    }

    #[test]
    fn uniform_grid_spans_t_range() {
        let v = uniform_t_grid(25);
        assert_eq!(v.len(), 25);
        assert_eq!(v[0], T_MIN);
        assert!((v[24] - T_MAX).abs() < 1e-12);
    }
}
