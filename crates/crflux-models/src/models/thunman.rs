// ─────────────────────────────────────────────────────────────────────
// CRFlux — Proton-only Power Laws
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Proton-only reference spectra.
//!
//! Both models ignore the nearest-nucleus fallback: any identifier other
//! than the proton evaluates to zero flux.

use crate::model::{split_at_threshold, FluxModel};
use crflux_types::error::FluxResult;
use crflux_types::nucleus::NucleusId;
use ndarray::{Array, Dimension};

const PROTON_ONLY: [NucleusId; 1] = [NucleusId::PROTON];

/// `norm·E^index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    pub norm: f64,
    pub index: f64,
}

impl PowerLaw {
    pub const fn new(norm: f64, index: f64) -> Self {
        PowerLaw { norm, index }
    }

    pub fn eval(&self, energy: f64) -> f64 {
        self.norm * energy.powf(self.index)
    }
}

/// Thunman, Ingelman & Gondolo, Astropart. Phys. 5, 309 (1996): E^-2.7
/// below a 5 PeV knee and E^-3 above.
#[derive(Debug, Clone)]
pub struct Thunman {
    low: PowerLaw,
    high: PowerLaw,
    knee: f64,
}

impl Thunman {
    pub fn new() -> Self {
        Thunman {
            low: PowerLaw::new(1.7e4, -2.7),
            high: PowerLaw::new(1.74e6, -3.0),
            knee: 5e6,
        }
    }

    pub fn knee(&self) -> f64 {
        self.knee
    }
}

impl Default for Thunman {
    fn default() -> Self {
        Self::new()
    }
}

impl FluxModel for Thunman {
    fn name(&self) -> &str {
        "Thunman et al. ('96)"
    }

    fn short_name(&self) -> &str {
        "TIG"
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        &PROTON_ONLY
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        if !id.is_proton() {
            return Ok(0.0);
        }
        Ok(if energy < self.knee {
            self.low.eval(energy)
        } else {
            self.high.eval(energy)
        })
    }

    fn nucleus_flux_array<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        if !id.is_proton() {
            return Ok(Array::zeros(energy.raw_dim()));
        }
        split_at_threshold(
            energy,
            self.knee,
            |low| Ok(low.mapv(|e| self.low.eval(e))),
            |high| Ok(high.mapv(|e| self.high.eval(e))),
        )
    }
}

/// Unbroken E^-2.7 proton spectrum, the low-energy branch of [`Thunman`].
#[derive(Debug, Clone)]
pub struct SimplePowerlaw27 {
    law: PowerLaw,
}

impl SimplePowerlaw27 {
    pub fn new() -> Self {
        SimplePowerlaw27 {
            law: PowerLaw::new(1.7e4, -2.7),
        }
    }
}

impl Default for SimplePowerlaw27 {
    fn default() -> Self {
        Self::new()
    }
}

impl FluxModel for SimplePowerlaw27 {
    fn name(&self) -> &str {
        "E^-2.7"
    }

    fn short_name(&self) -> &str {
        "E^-2.7"
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        &PROTON_ONLY
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        if !id.is_proton() {
            return Ok(0.0);
        }
        Ok(self.law.eval(energy))
    }
}
