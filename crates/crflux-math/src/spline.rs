// ─────────────────────────────────────────────────────────────────────
// CRFlux — Cubic Spline
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Natural cubic spline over tabulated curves.
//!
//! Nucleon-flux tables are stored as samples in ln(E). Outside the knot
//! range the spline evaluates to zero (FITPACK `ext=1` convention), which
//! tabulated consumers rely on.

use ndarray::{Array, Dimension};

/// Natural cubic spline interpolator for real-valued data.
#[derive(Debug, Clone)]
pub struct CubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot.
    y2s: Vec<f64>,
}

impl CubicSpline {
    /// Construct a natural cubic spline from data points.
    ///
    /// # Panics
    /// Panics on knots rejected by [`validate_knots`]. Use
    /// [`CubicSpline::try_new`] when the data comes from an untrusted source.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self::try_new(xs, ys).unwrap_or_else(|msg| panic!("{msg}"))
    }

    /// Fallible constructor; the error describes the first bad knot.
    pub fn try_new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, String> {
        validate_knots(&xs, &ys)?;

        let n = xs.len();
        let mut y2s = vec![0.0; n];
        let mut u = vec![0.0; n - 1];

        // Forward sweep of the tridiagonal system (natural boundary: y2 = 0 at ends)
        for i in 1..n - 1 {
            let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
            let p = sig * y2s[i - 1] + 2.0;
            y2s[i] = (sig - 1.0) / p;
            u[i] = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
                - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
            u[i] = (6.0 * u[i] / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
        }

        // Back substitution
        for k in (0..n - 2).rev() {
            y2s[k + 1] = y2s[k + 1] * y2s[k + 2] + u[k + 1];
        }

        Ok(Self { xs, ys, y2s })
    }

    pub fn knots(&self) -> &[f64] {
        &self.xs
    }

    pub fn values(&self) -> &[f64] {
        &self.ys
    }

    /// Evaluate at `x`; zero outside `[x_first, x_last]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if !(x >= self.xs[0] && x <= self.xs[n - 1]) {
            return 0.0;
        }

        // Binary search for the enclosing interval
        let mut lo = 0;
        let mut hi = n - 1;
        while hi - lo > 1 {
            let mid = (lo + hi) / 2;
            if self.xs[mid] > x {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let h = self.xs[hi] - self.xs[lo];
        let a = (self.xs[hi] - x) / h;
        let b = (x - self.xs[lo]) / h;

        a * self.ys[lo]
            + b * self.ys[hi]
            + ((a * a * a - a) * self.y2s[lo] + (b * b * b - b) * self.y2s[hi]) * h * h / 6.0
    }

    /// Element-wise evaluation preserving the input shape.
    pub fn evaluate_array<D: Dimension>(&self, x: &Array<f64, D>) -> Array<f64, D> {
        x.mapv(|v| self.evaluate(v))
    }
}

/// Check that `(xs, ys)` can define a spline.
pub fn validate_knots(xs: &[f64], ys: &[f64]) -> Result<(), String> {
    if xs.len() != ys.len() {
        return Err(format!(
            "knot length mismatch: {} x values, {} y values",
            xs.len(),
            ys.len()
        ));
    }
    if xs.len() < 2 {
        return Err("need at least 2 knots".to_string());
    }
    if let Some(i) = (1..xs.len()).find(|&i| !(xs[i] > xs[i - 1])) {
        return Err(format!("knots must be strictly increasing at index {i}"));
    }
    if xs.iter().chain(ys.iter()).any(|v| !v.is_finite()) {
        return Err("knots contain non-finite values".to_string());
    }
    Ok(())
}
