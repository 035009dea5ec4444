// ─────────────────────────────────────────────────────────────────────
// CRFlux — Energy Grids
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;

/// `n` logarithmically spaced points from `emin` to `emax` inclusive.
/// Python equivalent: `np.logspace(np.log10(emin), np.log10(emax), n)`.
pub fn log_grid(emin: f64, emax: f64, n: usize) -> Array1<f64> {
    Array1::logspace(10.0, emin.log10(), emax.log10(), n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_grid_endpoints() {
        let grid = log_grid(1.0, 1e11, 12);
        assert_eq!(grid.len(), 12);
        assert!((grid[0] - 1.0).abs() < 1e-12);
        assert!((grid[11] / 1e11 - 1.0).abs() < 1e-12);
        assert!((grid[3] / 1e3 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_grid_constant_ratio() {
        let grid = log_grid(2.0, 2e6, 25);
        let ratio = grid[1] / grid[0];
        for i in 1..grid.len() {
            assert!((grid[i] / grid[i - 1] - ratio).abs() < 1e-9);
        }
    }
}
