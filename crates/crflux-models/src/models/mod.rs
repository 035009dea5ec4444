// ─────────────────────────────────────────────────────────────────────
// CRFlux — Flux Model Families
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Concrete parametrisations of the primary cosmic-ray flux.

pub mod combined;
pub mod gaisser_honda;
pub mod gaisser_stanev_tilav;
pub mod global_spline_fit;
pub mod hillas_gaisser;
pub mod poly_gonato;
pub mod thunman;
pub mod zatsepin_sokolskaya;

use crflux_types::error::FluxError;

/// One source population ("Peters cycle") of a mass group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetersCycle {
    pub norm: f64,
    /// Integral spectral index; the differential slope is `index + 1`.
    pub index: f64,
}

impl PetersCycle {
    pub const fn new(norm: f64, index: f64) -> Self {
        PetersCycle { norm, index }
    }

    /// `norm·E^(−index−1)·exp(−E/(Z·cutoff))`.
    pub fn flux(&self, energy: f64, charge: f64, cutoff: f64) -> f64 {
        self.norm * energy.powf(-self.index - 1.0) * (-energy / charge / cutoff).exp()
    }
}

/// A mass group described by a sum of Peters cycles.
#[derive(Debug, Clone, PartialEq)]
pub struct MassGroup {
    pub charge: f64,
    /// One entry per population, aligned with the model's rigidity cutoffs.
    pub cycles: Vec<PetersCycle>,
}

impl MassGroup {
    pub fn new(charge: f64, cycles: Vec<PetersCycle>) -> Self {
        MassGroup { charge, cycles }
    }

    pub fn flux(&self, energy: f64, cutoffs: &[f64]) -> f64 {
        self.cycles
            .iter()
            .zip(cutoffs)
            .map(|(cycle, &cutoff)| cycle.flux(energy, self.charge, cutoff))
            .sum()
    }
}

pub(crate) fn unsupported(model: &str, option: &str) -> FluxError {
    FluxError::UnsupportedModelConfiguration {
        model: model.to_string(),
        option: option.to_string(),
    }
}
