// ─────────────────────────────────────────────────────────────────────
// CRFlux — Hillas-Gaisser 2012
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaisser, Astropart. Phys. 35, 801 (2012).
//!
//! Three Peters cycles over five mass groups. H3a keeps a mixed
//! composition in the extragalactic population, H4a makes it pure proton.
//! The poly-gonato flavour re-fits the first two populations so that the
//! model follows Hörandel's low-energy spectra.

use super::{unsupported, MassGroup, PetersCycle};
use crate::model::{FluxModel, ParamTable};
use crflux_types::error::{FluxError, FluxResult};
use crflux_types::nucleus::NucleusId;
use std::fmt;
use std::str::FromStr;

const MODEL: &str = "HillasGaisser2012";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HgVariant {
    H3a,
    H4a,
}

impl HgVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            HgVariant::H3a => "H3a",
            HgVariant::H4a => "H4a",
        }
    }
}

impl FromStr for HgVariant {
    type Err = FluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H3a" => Ok(HgVariant::H3a),
            "H4a" => Ok(HgVariant::H4a),
            other => Err(unsupported(MODEL, other)),
        }
    }
}

impl fmt::Display for HgVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const GROUPS: [(NucleusId, f64); 5] = [
    (NucleusId::PROTON, 1.0),
    (NucleusId::HELIUM, 2.0),
    (NucleusId::CARBON, 6.0),  // CNO
    (NucleusId::SILICON, 14.0), // MgAlSi
    (NucleusId::IRON, 26.0),
];

/// Galactic populations of the published model.
const POP1: [PetersCycle; 5] = [
    PetersCycle::new(7860.0, 1.66),
    PetersCycle::new(3550.0, 1.58),
    PetersCycle::new(2200.0, 1.63),
    PetersCycle::new(1430.0, 1.67),
    PetersCycle::new(2120.0, 1.63),
];
const POP2: [PetersCycle; 5] = [
    PetersCycle::new(20.0, 1.4),
    PetersCycle::new(20.0, 1.4),
    PetersCycle::new(13.4, 1.4),
    PetersCycle::new(13.4, 1.4),
    PetersCycle::new(13.4, 1.4),
];

/// Galactic populations re-fitted to poly-gonato below the knee.
const POP1_PG: [PetersCycle; 5] = [
    PetersCycle::new(11800.0, 1.71),
    PetersCycle::new(4750.0, 1.64),
    PetersCycle::new(3860.0, 1.67),
    PetersCycle::new(3120.0, 1.70),
    PetersCycle::new(1080.0, 1.55),
];
const POP2_PG: [PetersCycle; 5] = [
    PetersCycle::new(11.8, 1.4),
    PetersCycle::new(11.8, 1.4),
    PetersCycle::new(7.88, 1.4),
    PetersCycle::new(7.88, 1.4),
    PetersCycle::new(7.88, 1.4),
];

/// Extragalactic population.
const POP3_H3A: [PetersCycle; 5] = [
    PetersCycle::new(1.7, 1.4),
    PetersCycle::new(1.7, 1.4),
    PetersCycle::new(1.14, 1.4),
    PetersCycle::new(1.14, 1.4),
    PetersCycle::new(1.14, 1.4),
];
const POP3_H4A: [PetersCycle; 5] = [
    PetersCycle::new(200.0, 1.6),
    PetersCycle::new(0.0, 1.4),
    PetersCycle::new(0.0, 1.4),
    PetersCycle::new(0.0, 1.4),
    PetersCycle::new(0.0, 1.4),
];

#[derive(Debug, Clone)]
pub struct HillasGaisser2012 {
    variant: HgVariant,
    poly_gonato: bool,
    name: String,
    /// Rigidity cutoffs (GV) of the three populations.
    cutoffs: [f64; 3],
    groups: ParamTable<MassGroup>,
}

impl HillasGaisser2012 {
    pub fn new(variant: HgVariant) -> Self {
        let cut3 = match variant {
            HgVariant::H3a => 2e9,
            HgVariant::H4a => 60e9,
        };
        Self::build(variant, false, [4e6, 30e6, cut3], &POP1, &POP2)
    }

    /// H3a/H4a with the poly-gonato-like galactic populations.
    ///
    /// The extragalactic cutoff stays at 2e9 GV for both variants.
    pub fn with_poly_gonato(variant: HgVariant) -> Self {
        Self::build(variant, true, [4.49e6, 30e6, 2e9], &POP1_PG, &POP2_PG)
    }

    pub fn from_option(option: &str) -> FluxResult<Self> {
        Ok(Self::new(option.parse()?))
    }

    fn build(
        variant: HgVariant,
        poly_gonato: bool,
        cutoffs: [f64; 3],
        pop1: &[PetersCycle; 5],
        pop2: &[PetersCycle; 5],
    ) -> Self {
        let pop3 = match variant {
            HgVariant::H3a => &POP3_H3A,
            HgVariant::H4a => &POP3_H4A,
        };
        let rows = GROUPS
            .iter()
            .enumerate()
            .map(|(i, &(id, charge))| {
                (id, MassGroup::new(charge, vec![pop1[i], pop2[i], pop3[i]]))
            })
            .collect();

        let name = if poly_gonato {
            format!("Hillas-Gaisser ({variant}, poly-gonato)")
        } else {
            format!("Hillas-Gaisser ({variant})")
        };
        log::debug!("built {name}");

        HillasGaisser2012 {
            variant,
            poly_gonato,
            name,
            cutoffs,
            groups: ParamTable::new(rows),
        }
    }

    pub fn variant(&self) -> HgVariant {
        self.variant
    }

    pub fn is_poly_gonato(&self) -> bool {
        self.poly_gonato
    }

    pub fn cutoffs(&self) -> &[f64; 3] {
        &self.cutoffs
    }
}

impl Default for HillasGaisser2012 {
    fn default() -> Self {
        Self::new(HgVariant::H4a)
    }
}

impl FluxModel for HillasGaisser2012 {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        self.variant.as_str()
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        self.groups.ids()
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        let (_, group) = self.groups.resolve(id)?;
        Ok(group.flux(energy, &self.cutoffs))
    }
}
