// ─────────────────────────────────────────────────────────────────────
// CRFlux — Global Spline Fit
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Data-driven fit of Dembinski et al., PoS ICRC2017 533.
//!
//! [`GlobalSplineFit`] evaluates the full element-resolved fit through an
//! [`ExternalFluxProvider`]. [`GlobalSplineFitBeta`] only carries the
//! tabulated nucleon flux and therefore has no per-nucleus spectra.

use crate::model::{FluxModel, NucleonFlux};
use crate::provider::{CalibrationInterval, ExternalFluxProvider};
use crate::spline_table::{latest_spline_file, NucleonSplineTable};
use crflux_types::error::{FluxError, FluxResult};
use crflux_types::nucleus::NucleusId;
use ndarray::{Array, Dimension, Zip};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Measurement window the published fit is calibrated to.
pub const GSF_INTERVAL: CalibrationInterval = CalibrationInterval::new(200901, 201612);

/// Elements whose nucleon flux carries the whole composition (p, He, O, Fe).
const LEADING_CHARGES: [u32; 4] = [1, 2, 8, 26];

#[derive(Debug, Clone)]
pub struct GlobalSplineFit {
    provider: Arc<dyn ExternalFluxProvider>,
    interval: CalibrationInterval,
    ids: Vec<NucleusId>,
}

impl GlobalSplineFit {
    pub fn new(provider: Arc<dyn ExternalFluxProvider>) -> FluxResult<Self> {
        let elements = provider.elements().map_err(|e| {
            FluxError::DataProviderUnavailable(format!("element table: {e}"))
        })?;
        if elements.is_empty() {
            return Err(FluxError::DataProviderUnavailable(
                "element table is empty".to_string(),
            ));
        }

        let ids: Vec<NucleusId> = elements
            .iter()
            .map(|&(z, a)| NucleusId::from_z_a(z, a.round() as u32))
            .collect();
        log::debug!("GSF provider exposes {} elements", ids.len());

        Ok(GlobalSplineFit {
            provider,
            interval: GSF_INTERVAL,
            ids,
        })
    }

    pub fn interval(&self) -> CalibrationInterval {
        self.interval
    }
}

impl FluxModel for GlobalSplineFit {
    fn name(&self) -> &str {
        "Dembinski et al. (2017)"
    }

    fn short_name(&self) -> &str {
        "GSF"
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        &self.ids
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        Ok(self.provider.eflux(id.charge(), energy, self.interval))
    }

    fn p_and_n_flux<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<NucleonFlux<D>> {
        let mut proton = Array::zeros(energy.raw_dim());
        let mut neutron = Array::zeros(energy.raw_dim());
        Zip::from(&mut proton)
            .and(&mut neutron)
            .and(energy)
            .for_each(|p, n, &e| {
                for &z in LEADING_CHARGES.iter() {
                    let (pz, nz) = self.provider.nucleon_flux(z, e, self.interval);
                    *p += pz;
                    *n += nz;
                }
            });
        let proton_fraction = Zip::from(&proton)
            .and(&neutron)
            .map_collect(|&p, &n| p / (p + n));
        Ok(NucleonFlux {
            proton_fraction,
            proton,
            neutron,
        })
    }
}

/// Tabulated nucleon flux of the global spline fit.
///
/// Only the nucleon-level queries are meaningful. `nucleus_flux` returns
/// zeros, the supported set is empty, so `total_flux` is zero and `ln_a`
/// and `delta_0` come out as NaN.
#[derive(Debug, Clone)]
pub struct GlobalSplineFitBeta {
    table: NucleonSplineTable,
    source: Option<PathBuf>,
}

impl GlobalSplineFitBeta {
    pub fn from_table(table: NucleonSplineTable) -> Self {
        GlobalSplineFitBeta {
            table,
            source: None,
        }
    }

    pub fn from_file(path: &Path) -> FluxResult<Self> {
        let table = NucleonSplineTable::from_npz(path)?;
        Ok(GlobalSplineFitBeta {
            table,
            source: Some(path.to_path_buf()),
        })
    }

    /// Load the most recent `GSF_spline_YYYYMMDD.npz` found in `dir`.
    pub fn from_dir(dir: &Path) -> FluxResult<Self> {
        Self::from_file(&latest_spline_file(dir)?)
    }

    pub fn table(&self) -> &NucleonSplineTable {
        &self.table
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl FluxModel for GlobalSplineFitBeta {
    fn name(&self) -> &str {
        "Global Spline Fit"
    }

    fn short_name(&self) -> &str {
        "GSF"
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        &[]
    }

    fn nucleus_flux(&self, _id: NucleusId, _energy: f64) -> FluxResult<f64> {
        Ok(0.0)
    }

    fn p_and_n_flux<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<NucleonFlux<D>> {
        Ok(self.table.evaluate(energy))
    }

    fn tot_nucleon_flux<D: Dimension>(
        &self,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        Ok(self.table.evaluate(energy).total())
    }
}
