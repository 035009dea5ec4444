// ─────────────────────────────────────────────────────────────────────
// CRFlux — Combined GH and HG
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fedynitch, Becker Tjus & Desiati, PRD 86, 114024 (2012).
//!
//! Gaisser-Honda at low energies, Hillas-Gaisser 2012 above a per-group
//! transition energy where the two spectra cross. The transitions are
//! solved once when the model is built.

use super::gaisser_honda::GaisserHonda;
use super::hillas_gaisser::{HgVariant, HillasGaisser2012};
use crate::model::{split_at_threshold, FluxModel, ParamTable};
use crflux_math::roots::{newton_solve, NewtonConfig};
use crflux_types::error::{FluxError, FluxResult};
use crflux_types::nucleus::NucleusId;
use ndarray::{Array, Dimension};

/// Starting guess for the crossing, in log10(E/GeV).
const LOG10_E_START: f64 = 3.1;

const GROUPS: [NucleusId; 5] = [
    NucleusId::PROTON,
    NucleusId::HELIUM,
    NucleusId::CARBON,
    NucleusId::SILICON,
    NucleusId::IRON,
];

#[derive(Debug, Clone)]
pub struct CombinedGhAndHg {
    name: String,
    short_name: String,
    low: GaisserHonda,
    high: HillasGaisser2012,
    /// Transition energy (GeV) per mass group.
    transitions: ParamTable<f64>,
}

impl CombinedGhAndHg {
    pub fn new(variant: HgVariant) -> FluxResult<Self> {
        Self::with_solver(variant, NewtonConfig::default())
    }

    pub fn from_option(option: &str) -> FluxResult<Self> {
        Self::new(option.parse()?)
    }

    pub fn with_solver(variant: HgVariant, config: NewtonConfig) -> FluxResult<Self> {
        let low = GaisserHonda::new();
        let high = HillasGaisser2012::new(variant);

        let mut rows = Vec::with_capacity(GROUPS.len());
        for &id in GROUPS.iter() {
            let e_t = solve_transition(&low, &high, id, config)?;
            log::info!("c{variant}: GH -> HG transition for {id} at {e_t:.4e} GeV");
            rows.push((id, e_t));
        }

        Ok(CombinedGhAndHg {
            name: format!("comb. GH and {variant}"),
            short_name: format!("c{variant}"),
            low,
            high,
            transitions: ParamTable::new(rows),
        })
    }

    /// Energy at which `id` switches from the low- to the high-energy model.
    pub fn transition_energy(&self, id: NucleusId) -> FluxResult<f64> {
        self.transitions.resolve(id).map(|(_, &e_t)| e_t)
    }

    pub fn low_energy_model(&self) -> &GaisserHonda {
        &self.low
    }

    pub fn high_energy_model(&self) -> &HillasGaisser2012 {
        &self.high
    }
}

/// Crossing of two spectra for one nucleus: root of Φ_low − Φ_high as a
/// function of log10(E), Newton-iterated from log10(E) = 3.1.
///
/// The spectra can cross more than once (iron does, near 0.6 and 14 TeV);
/// the crossing returned is the one this iteration reaches from the start.
pub fn solve_transition<L, H>(
    low: &L,
    high: &H,
    id: NucleusId,
    config: NewtonConfig,
) -> FluxResult<f64>
where
    L: FluxModel + ?Sized,
    H: FluxModel + ?Sized,
{
    // Resolve up front so lookup errors surface as such rather than as NaN.
    low.nucleus_flux(id, 10f64.powf(LOG10_E_START))?;
    high.nucleus_flux(id, 10f64.powf(LOG10_E_START))?;

    let difference = |log_e: f64| {
        let e = 10f64.powf(log_e);
        match (low.nucleus_flux(id, e), high.nucleus_flux(id, e)) {
            (Ok(lo), Ok(hi)) => lo - hi,
            _ => f64::NAN,
        }
    };

    let result = newton_solve(difference, LOG10_E_START, config);
    if result.converged && result.root.is_finite() {
        Ok(10f64.powf(result.root))
    } else {
        Err(FluxError::TransitionNotFound {
            nucleus: id.raw(),
            iterations: result.iterations,
            message: format!(
                "no crossing of {} and {} (last log10(E) = {:.4}, residual = {:.3e})",
                low.short_name(),
                high.short_name(),
                result.root,
                result.residual
            ),
        })
    }
}

impl FluxModel for CombinedGhAndHg {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        self.transitions.ids()
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        let (found, &e_t) = self.transitions.resolve(id)?;
        if energy < e_t {
            self.low.nucleus_flux(found, energy)
        } else {
            self.high.nucleus_flux(found, energy)
        }
    }

    fn nucleus_flux_array<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        let (found, &e_t) = self.transitions.resolve(id)?;
        split_at_threshold(
            energy,
            e_t,
            |low| self.low.nucleus_flux_array(found, low),
            |high| self.high.nucleus_flux_array(found, high),
        )
    }
}
