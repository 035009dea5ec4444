// ─────────────────────────────────────────────────────────────────────
// CRFlux — Newton Root Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Bounded Newton iteration for scalar roots with a forward-difference
//! derivative.
//!
//! Used once per nucleus when a composite model locates the energy at which
//! its low- and high-energy components agree. Which root is found depends
//! on the starting point and the step rule, so both are part of the
//! contract. The iteration count is capped so a missing root ends in a
//! non-converged result instead of a hang.

#[derive(Debug, Clone, Copy)]
pub struct NewtonConfig {
    pub max_iters: usize,
    /// Convergence threshold on the step size, relative to `1 + |x|`.
    pub xtol: f64,
    /// Forward-difference step, relative to `max(|x|, 1)`.
    pub fd_step: f64,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            xtol: 1.49012e-8,
            fd_step: 1.49012e-8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RootResult {
    pub converged: bool,
    pub iterations: usize,
    pub root: f64,
    /// |f(root)| at the last evaluated point.
    pub residual: f64,
}

/// Find a root of `f` starting from `x0`.
pub fn newton_solve<F>(mut f: F, x0: f64, config: NewtonConfig) -> RootResult
where
    F: FnMut(f64) -> f64,
{
    let mut x = x0;
    let mut fx = f(x);

    for iter in 1..=config.max_iters {
        if fx == 0.0 {
            return RootResult {
                converged: true,
                iterations: iter - 1,
                root: x,
                residual: 0.0,
            };
        }

        let h = config.fd_step * x.abs().max(1.0);
        let slope = (f(x + h) - fx) / h;
        if slope == 0.0 || !slope.is_finite() || !fx.is_finite() {
            return RootResult {
                converged: false,
                iterations: iter,
                root: x,
                residual: fx.abs(),
            };
        }

        let dx = -fx / slope;
        x += dx;
        fx = f(x);

        if !x.is_finite() {
            return RootResult {
                converged: false,
                iterations: iter,
                root: x,
                residual: fx.abs(),
            };
        }
        if dx.abs() <= config.xtol * (1.0 + x.abs()) {
            return RootResult {
                converged: fx.is_finite(),
                iterations: iter,
                root: x,
                residual: fx.abs(),
            };
        }
    }

    RootResult {
        converged: false,
        iterations: config.max_iters,
        root: x,
        residual: fx.abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newton_linear_exact() {
        let result = newton_solve(|x| 2.0 * x - 7.0, 0.0, NewtonConfig::default());
        assert!(result.converged);
        assert!((result.root - 3.5).abs() < 1e-10);
    }

    #[test]
    fn test_newton_sqrt2() {
        let result = newton_solve(|x| x * x - 2.0, 1.0, NewtonConfig::default());
        assert!(result.converged);
        assert!((result.root - 2f64.sqrt()).abs() < 1e-10);
        assert!(result.iterations < 20);
    }

    #[test]
    fn test_newton_picks_root_downhill_of_start() {
        // Roots at 1 and 3; the tangent at 3.6 points to the upper one.
        let result = newton_solve(|x| (x - 1.0) * (x - 3.0), 3.6, NewtonConfig::default());
        assert!(result.converged);
        assert!((result.root - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_newton_no_root_is_bounded() {
        let config = NewtonConfig {
            max_iters: 25,
            ..NewtonConfig::default()
        };
        let result = newton_solve(|x| x * x + 1.0, 3.0, config);
        assert!(!result.converged);
        assert!(result.iterations <= 25);
    }

    #[test]
    fn test_newton_flat_function_fails() {
        let result = newton_solve(|_| 1.0, 0.0, NewtonConfig::default());
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
    }
}
