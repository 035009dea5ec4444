// ─────────────────────────────────────────────────────────────────────
// CRFlux — Gaisser-Honda
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Five mass groups with a single power law each, Gaisser & Honda,
//! Ann. Rev. Nucl. Part. Sci. 52, 153 (2002). Tuned to balloon data and
//! not meant for use above ~100 TeV per nucleon.

use crate::model::{FluxModel, ParamTable};
use crflux_types::error::FluxResult;
use crflux_types::nucleus::NucleusId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaisserHondaParams {
    pub alpha: f64,
    pub k: f64,
    pub b: f64,
    pub c: f64,
}

const fn gh(alpha: f64, k: f64, b: f64, c: f64) -> GaisserHondaParams {
    GaisserHondaParams { alpha, k, b, c }
}

const GROUPS: [(NucleusId, GaisserHondaParams); 5] = [
    (NucleusId::PROTON, gh(2.74, 14900.0, 2.15, 0.21)),
    (NucleusId::HELIUM, gh(2.64, 600.0, 1.25, 0.14)),
    (NucleusId::CARBON, gh(2.60, 33.2, 0.97, 0.01)),
    // MgAlSi with the published slope and normalisation corrections applied
    (NucleusId::SILICON, gh(2.79 + 0.08, 34.2 - 6.0, 2.14, 0.01)),
    (NucleusId::IRON, gh(2.68, 4.45, 3.07, 0.41)),
];

#[derive(Debug, Clone)]
pub struct GaisserHonda {
    params: ParamTable<GaisserHondaParams>,
}

impl GaisserHonda {
    pub fn new() -> Self {
        GaisserHonda {
            params: ParamTable::new(GROUPS.to_vec()),
        }
    }
}

impl Default for GaisserHonda {
    fn default() -> Self {
        Self::new()
    }
}

impl FluxModel for GaisserHonda {
    fn name(&self) -> &str {
        "Gaisser-Honda"
    }

    fn short_name(&self) -> &str {
        "GH"
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        self.params.ids()
    }

    /// `(K/A)·(E/A + b·exp(−c·√(E/A)))^(−α)`
    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        let (found, p) = self.params.resolve(id)?;
        let a = f64::from(found.mass_number());
        let e_per_nucleon = energy / a;
        let shape = e_per_nucleon + p.b * (-p.c * e_per_nucleon.sqrt()).exp();
        Ok(p.k / a * shape.powf(-p.alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proton_at_100_gev() {
        let model = GaisserHonda::new();
        let expected = 14900.0 * (100.0 + 2.15 * (-0.21 * 10.0f64).exp()).powf(-2.74);
        let flux = model.nucleus_flux(NucleusId::PROTON, 100.0).unwrap();
        assert!((flux - expected).abs() <= 1e-14 * expected);
    }

    #[test]
    fn test_helium_uses_energy_per_nucleon() {
        let model = GaisserHonda::new();
        let e = 400.0;
        let expected = 600.0 / 4.0 * (100.0 + 1.25 * (-0.14 * 10.0f64).exp()).powf(-2.64);
        let flux = model.nucleus_flux(NucleusId::HELIUM, e).unwrap();
        assert!((flux - expected).abs() <= 1e-14 * expected);
    }

    #[test]
    fn test_substitution_uses_group_mass() {
        let model = GaisserHonda::new();
        let n = model.nucleus_flux(NucleusId::NITROGEN, 1e3).unwrap();
        let c = model.nucleus_flux(NucleusId::CARBON, 1e3).unwrap();
        assert_eq!(n, c);
    }
}
