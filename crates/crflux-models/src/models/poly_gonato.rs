// ─────────────────────────────────────────────────────────────────────
// CRFlux — Poly-gonato
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Hörandel's poly-gonato model, Astropart. Phys. 19, 193 (2003).
//!
//! Each element follows a power law with a rigidity-dependent knee at
//! `Z·E_p`. Above the knee the spectrum steepens either by a common
//! `Δγ` or, with `constdelta`, to a common final slope `γ_c`.

use crate::model::{FluxModel, ParamTable};
use crflux_types::error::FluxResult;
use crflux_types::nucleus::NucleusId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyGonatoParams {
    /// Flux at 1 TeV in (m² s sr TeV)⁻¹.
    pub norm: f64,
    pub index: f64,
    /// Knee position in units of `E_p`.
    pub knee_scale: f64,
}

const fn pg(norm: f64, index: f64, knee_scale: f64) -> PolyGonatoParams {
    PolyGonatoParams {
        norm,
        index,
        knee_scale,
    }
}

const ELEMENTS: [(u32, PolyGonatoParams); 11] = [
    (14, pg(8.73e-2, 2.71, 1.0)),   // H
    (402, pg(5.71e-2, 2.64, 2.0)),  // He
    (1206, pg(1.06e-2, 2.66, 6.0)), // C
    (1407, pg(2.35e-3, 2.72, 7.0)), // N
    (1608, pg(1.57e-2, 2.68, 8.0)), // O
    (2412, pg(8.01e-3, 2.64, 12.0)), // Mg
    (2613, pg(1.15e-3, 2.66, 13.0)), // Al
    (2814, pg(7.96e-3, 2.75, 14.0)), // Si
    (5025, pg(1.35e-3, 2.46, 25.0)), // Mn
    (5426, pg(2.04e-2, 2.59, 26.0)), // Fe
    (5427, pg(7.51e-5, 2.72, 27.0)), // Co
];

#[derive(Debug, Clone)]
pub struct PolyGonato {
    constdelta: bool,
    /// Proton knee energy (GeV).
    e_p: f64,
    gamma_c: f64,
    /// Smoothness of the knee transition.
    epsilon_c: f64,
    delta_gamma: f64,
    params: ParamTable<PolyGonatoParams>,
}

impl PolyGonato {
    pub fn new(constdelta: bool) -> Self {
        let (e_p, epsilon_c) = if constdelta {
            (4.49e6, 1.90)
        } else {
            (4.51e6, 1.87)
        };
        let params = ParamTable::new(
            ELEMENTS
                .iter()
                .map(|&(raw, p)| (NucleusId::new(raw), p))
                .collect(),
        );
        log::debug!("poly-gonato model built (constdelta = {constdelta})");
        PolyGonato {
            constdelta,
            e_p,
            gamma_c: -4.68,
            epsilon_c,
            delta_gamma: 2.10,
            params,
        }
    }

    pub fn constdelta(&self) -> bool {
        self.constdelta
    }

    fn formula(&self, p: &PolyGonatoParams, energy: f64) -> f64 {
        let gamma = if self.constdelta {
            self.gamma_c + p.index
        } else {
            -self.delta_gamma
        };
        p.norm / 1000.0
            * (energy / 1000.0).powf(-p.index)
            * (1.0 + (energy / p.knee_scale / self.e_p).powf(self.epsilon_c))
                .powf(gamma / self.epsilon_c)
    }
}

impl Default for PolyGonato {
    fn default() -> Self {
        Self::new(false)
    }
}

impl FluxModel for PolyGonato {
    fn name(&self) -> &str {
        "poly-gonato"
    }

    fn short_name(&self) -> &str {
        "pg"
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        self.params.ids()
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        let (_, p) = self.params.resolve(id)?;
        Ok(self.formula(p, energy))
    }
}
