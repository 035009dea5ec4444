// ─────────────────────────────────────────────────────────────────────
// CRFlux — Gaisser-Stanev-Tilav
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaisser, Stanev & Tilav, arXiv:1303.3565 (2013).
//!
//! Peters-cycle model with three or four populations. Besides H, He, C, O
//! and Fe it carries two heavy groups (Te-128, Hg-201) that only take part
//! in totals when explicitly requested.

use super::{unsupported, MassGroup, PetersCycle};
use crate::model::{FluxModel, ParamTable};
use crflux_types::error::{FluxError, FluxResult};
use crflux_types::nucleus::NucleusId;
use std::str::FromStr;

const MODEL: &str = "GaisserStanevTilav";

const TELLURIUM: NucleusId = NucleusId::new(12852);
const MERCURY: NucleusId = NucleusId::new(20180);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GstVariant {
    ThreeGen,
    FourGen,
}

impl GstVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            GstVariant::ThreeGen => "3-gen",
            GstVariant::FourGen => "4-gen",
        }
    }
}

impl FromStr for GstVariant {
    type Err = FluxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "3-gen" => Ok(GstVariant::ThreeGen),
            "4-gen" => Ok(GstVariant::FourGen),
            other => Err(unsupported(MODEL, other)),
        }
    }
}

const fn c(norm: f64, index: f64) -> PetersCycle {
    PetersCycle::new(norm, index)
}

/// (id, Z, population 1, population 2 light part) for H, He, C, O.
const LIGHT: [(NucleusId, f64, PetersCycle, PetersCycle); 4] = [
    (NucleusId::PROTON, 1.0, c(7000.0, 1.66), c(150.0, 1.4)),
    (NucleusId::HELIUM, 2.0, c(3200.0, 1.58), c(65.0, 1.3)),
    (NucleusId::CARBON, 6.0, c(100.0, 1.4), c(6.0, 1.3)),
    (NucleusId::OXYGEN, 8.0, c(130.0, 1.4), c(7.0, 1.3)),
];

#[derive(Debug, Clone)]
pub struct GaisserStanevTilav {
    variant: GstVariant,
    include_heavy_in_total: bool,
    name: String,
    cutoffs: Vec<f64>,
    groups: ParamTable<MassGroup>,
}

impl GaisserStanevTilav {
    pub fn new(variant: GstVariant, include_heavy_in_total: bool) -> Self {
        // Population 2 of the Fe/heavy groups and population 3 depend on the variant.
        let (fe2, te2, hg2, pop3, cutoffs) = match variant {
            GstVariant::ThreeGen => (
                c(2.3, 1.2),
                c(0.1, 1.2),
                c(0.4, 1.2),
                [c(14.0, 1.4), c(0.0, 1.4), c(0.0, 1.4), c(0.0, 1.3), c(0.025, 1.2)],
                vec![120e3, 4e6, 1.3e9],
            ),
            GstVariant::FourGen => (
                c(2.1, 1.2),
                c(0.1, 1.2),
                c(0.53, 1.2),
                [c(12.0, 1.4), c(0.0, 1.4), c(0.0, 1.4), c(0.0, 1.3), c(0.011, 1.2)],
                vec![120e3, 4e6, 1.5e9, 40e9],
            ),
        };
        let four_gen = variant == GstVariant::FourGen;
        let pop4 = [c(1.2, 1.4), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0)];

        let mut rows = Vec::with_capacity(7);
        for (i, &(id, charge, pop1, pop2)) in LIGHT.iter().enumerate() {
            let mut cycles = vec![pop1, pop2, pop3[i]];
            if four_gen {
                cycles.push(pop4[i]);
            }
            rows.push((id, MassGroup::new(charge, cycles)));
        }

        let mut iron = vec![c(60.0, 1.3), fe2, pop3[4]];
        if four_gen {
            iron.push(pop4[4]);
        }
        rows.push((NucleusId::IRON, MassGroup::new(26.0, iron)));

        if include_heavy_in_total {
            // The heavy groups have no fourth population.
            let inert = c(0.0, 1.0);
            for (id, charge, pop2) in [(TELLURIUM, 52.0, te2), (MERCURY, 80.0, hg2)] {
                let mut cycles = vec![inert, pop2, inert];
                if four_gen {
                    cycles.push(c(0.0, 0.0));
                }
                rows.push((id, MassGroup::new(charge, cycles)));
            }
        }

        let name = format!("GST ({})", variant.as_str());
        log::debug!("built {name} (heavy groups in total: {include_heavy_in_total})");

        GaisserStanevTilav {
            variant,
            include_heavy_in_total,
            name,
            cutoffs,
            groups: ParamTable::new(rows),
        }
    }

    pub fn from_option(option: &str, include_heavy_in_total: bool) -> FluxResult<Self> {
        Ok(Self::new(option.parse()?, include_heavy_in_total))
    }

    pub fn variant(&self) -> GstVariant {
        self.variant
    }

    pub fn includes_heavy(&self) -> bool {
        self.include_heavy_in_total
    }

    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }
}

impl Default for GaisserStanevTilav {
    fn default() -> Self {
        Self::new(GstVariant::ThreeGen, false)
    }
}

impl FluxModel for GaisserStanevTilav {
    fn name(&self) -> &str {
        &self.name
    }

    fn short_name(&self) -> &str {
        match self.variant {
            GstVariant::ThreeGen => "GST3",
            GstVariant::FourGen => "GST4",
        }
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        self.groups.ids()
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        let (_, group) = self.groups.resolve(id)?;
        Ok(group.flux(energy, &self.cutoffs))
    }
}
