// ─────────────────────────────────────────────────────────────────────
// CRFlux — Zatsepin-Sokolskaya
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Three-source-class model of Zatsepin & Sokolskaya, A&A 458, 1 (2006),
//! with the original parameters or the PAMELA re-fit (Science 332, 69, 2011).
//!
//! Spectra are built in rigidity from a source term and an escape length,
//! normalised at 10 TeV. Below 300 GeV a force-field style solar modulation
//! correction is applied. Not valid above a few PeV.

use super::unsupported;
use crate::model::{split_at_threshold, FluxModel, ParamTable};
use crflux_types::constants::{
    ELECTRON_MASS_GEV, ZS_MODULATION_SCALE, ZS_MODULATION_THRESHOLD_GEV, ZS_NUCLEON_MASS_GEV,
};
use crflux_types::error::{FluxError, FluxResult};
use crflux_types::nucleus::NucleusId;
use ndarray::{Array, Dimension};
use std::str::FromStr;

const MODEL: &str = "ZatsepinSokolskaya";
/// Normalisation energy (GeV).
const E_NORM: f64 = 1e4;
const R_0: f64 = 5.5;
const ALPHA: [f64; 3] = [2.3, 2.1, 2.57];
const R_MAX: [f64; 3] = [8e4, 4e6, 2e2];
const GAMMA: [f64; 3] = [2.63, 2.43, 2.9];
const GAMMA_K: [f64; 3] = [8.0, 4.5, 4.5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZsVariant {
    /// Parameters of the 2006 paper.
    Default,
    Pamela,
}

impl FromStr for ZsVariant {
    type Err = FluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ZsVariant::Default),
            "pamela" => Ok(ZsVariant::Pamela),
            other => Err(unsupported(MODEL, other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZsGroupParams {
    /// Flux of each source class at `E_NORM`, in units of `E_NORM^-2.75`.
    pub norms: [f64; 3],
    /// Grammage scale of the escape (g/cm²).
    pub x_esc: f64,
}

const fn zs(n1: f64, n2: f64, n3: f64, x_esc: f64) -> ZsGroupParams {
    ZsGroupParams {
        norms: [n1, n2, n3],
        x_esc,
    }
}

#[derive(Debug, Clone)]
pub struct ZatsepinSokolskaya {
    variant: ZsVariant,
    params: ParamTable<ZsGroupParams>,
}

impl ZatsepinSokolskaya {
    pub fn new(variant: ZsVariant) -> Self {
        let (proton, helium) = match variant {
            ZsVariant::Pamela => (zs(7.1e3, 6.25e3, 3.0, 74.0), zs(9.5e3, 8.5e3, 0.74, 18.0)),
            ZsVariant::Default => (zs(1.36e4, 6.25e3, 2.1, 74.0), zs(8.75e3, 8.5e3, 3.0, 18.0)),
        };
        let params = ParamTable::new(vec![
            (NucleusId::PROTON, proton),
            (NucleusId::HELIUM, helium),
            (NucleusId::CARBON, zs(6.75e3, 1.8e3, 30.0, 5.8)),
            (NucleusId::SILICON, zs(5.5e3, 1.5e3, 110.0, 3.5)),
            (NucleusId::IRON, zs(3.5e3, 1.2e3, 750.0, 2.4)),
        ]);
        ZatsepinSokolskaya { variant, params }
    }

    pub fn from_option(option: &str) -> FluxResult<Self> {
        Ok(Self::new(option.parse()?))
    }

    pub fn variant(&self) -> ZsVariant {
        self.variant
    }

    /// Unmodulated flux of a resolved group.
    fn interstellar_flux(&self, id: NucleusId, p: &ZsGroupParams, energy: f64) -> f64 {
        let (z, a) = id.z_a_f64();
        (0..3)
            .map(|gen| {
                p.norms[gen] * E_NORM.powf(-2.75) / dn_de(E_NORM, z, a, p.x_esc, gen)
                    * dn_de(energy, z, a, p.x_esc, gen)
            })
            .sum()
    }

    /// Flux at `energy` shifted by the modulation potential, times the
    /// phase-space ratio.
    fn modulated_flux(&self, id: NucleusId, p: &ZsGroupParams, energy: f64) -> f64 {
        let m = ZS_NUCLEON_MASS_GEV;
        let shift = id.charge() as f64 * ELECTRON_MASS_GEV * ZS_MODULATION_SCALE;
        let shifted = energy + shift;
        let phase_space =
            (energy * energy + 2.0 * m * energy) / (shifted * shifted + 2.0 * m * shifted);
        self.interstellar_flux(id, p, shifted) * phase_space
    }

    fn flux_at(&self, id: NucleusId, p: &ZsGroupParams, energy: f64) -> f64 {
        if energy < ZS_MODULATION_THRESHOLD_GEV {
            self.modulated_flux(id, p, energy)
        } else {
            self.interstellar_flux(id, p, energy)
        }
    }
}

impl Default for ZatsepinSokolskaya {
    fn default() -> Self {
        Self::new(ZsVariant::Pamela)
    }
}

fn escape_length(rigidity: f64) -> f64 {
    let x = rigidity / R_0;
    4.2 * x.powf(-1.0 / 3.0) * (1.0 + x.powf(-2.0 / 3.0))
}

fn source(rigidity: f64, gen: usize) -> f64 {
    rigidity.powf(-ALPHA[gen])
        * (1.0 + (rigidity / R_MAX[gen]).powi(2)).powf((GAMMA[gen] - GAMMA_K[gen]) / 2.0)
}

fn dn_dr(rigidity: f64, x_esc: f64, gen: usize) -> f64 {
    let lambda = escape_length(rigidity);
    source(rigidity, gen) * lambda / (1.0 + lambda / x_esc)
}

fn dn_de(energy: f64, z: f64, a: f64, x_esc: f64, gen: usize) -> f64 {
    let m_a = ZS_NUCLEON_MASS_GEV * a;
    let pc = (energy * energy + 2.0 * m_a * energy).sqrt();
    let rigidity = pc / z;
    let dr_de = (energy + m_a) / (z * pc);
    dr_de * dn_dr(rigidity, x_esc, gen)
}

impl FluxModel for ZatsepinSokolskaya {
    fn name(&self) -> &str {
        match self.variant {
            ZsVariant::Default => "Zatsepin-Sokolskaya",
            ZsVariant::Pamela => "Zatsepin-Sokolskaya/Pamela",
        }
    }

    fn short_name(&self) -> &str {
        match self.variant {
            ZsVariant::Default => "ZS",
            ZsVariant::Pamela => "ZSP",
        }
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        self.params.ids()
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        let (found, p) = self.params.resolve(id)?;
        Ok(self.flux_at(found, p, energy))
    }

    fn nucleus_flux_array<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        let (found, p) = self.params.resolve(id)?;
        split_at_threshold(
            energy,
            ZS_MODULATION_THRESHOLD_GEV,
            |low| Ok(low.mapv(|e| self.modulated_flux(found, p, e))),
            |high| Ok(high.mapv(|e| self.interstellar_flux(found, p, e))),
        )
    }
}
