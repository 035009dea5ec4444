// ─────────────────────────────────────────────────────────────────────
// CRFlux — Derived Quantities
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Quantities computed generically from any model's per-nucleus flux.
//!
//! Nucleon quantities use the superposition picture: a nucleus of mass A at
//! lab energy A·E contributes A nucleons of energy E, and the Jacobian of
//! the energy rescaling adds another factor A.
//!
//! No clamping is applied anywhere; a model that returns a non-physical
//! flux yields NaN/Inf here and the caller sees it.

use crate::model::{FluxModel, NucleonFlux};
use crflux_types::error::FluxResult;
use crflux_types::nucleus::NucleusId;
use ndarray::{Array, Dimension, Zip};

/// Mass groups probed by the proton-excess diagnostic, as (id, Z).
/// Each stands for an isoscalar nucleus with A = 2Z.
const PROTON_EXCESS_GROUPS: [(NucleusId, f64); 4] = [
    (NucleusId::HELIUM, 2.0),
    (NucleusId::CARBON, 6.0),
    (NucleusId::SILICON, 14.0),
    (NucleusId::IRON, 26.0),
];

/// Σ over supported nuclei of Φ(id, E).
pub fn total_flux<M, D>(model: &M, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    let mut total = Array::zeros(energy.raw_dim());
    for &id in model.nucleus_ids() {
        total += &model.nucleus_flux_array(id, energy)?;
    }
    Ok(total)
}

/// Σ over supported nuclei of A²·Φ(id, A·E), E per nucleon.
pub fn tot_nucleon_flux<M, D>(model: &M, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    let mut total = Array::zeros(energy.raw_dim());
    for &id in model.nucleus_ids() {
        let a = f64::from(id.mass_number());
        let lab_energy = energy.mapv(|e| e * a);
        total += &(model.nucleus_flux_array(id, &lab_energy)? * (a * a));
    }
    Ok(total)
}

/// Numerical d log10(Φ) / d log10(E) with symmetric offsets E·(1 ± δ).
pub fn spectral_index<D, F>(
    mut flux_fn: F,
    energy: &Array<f64, D>,
    rel_delta: f64,
) -> FluxResult<Array<f64, D>>
where
    D: Dimension,
    F: FnMut(&Array<f64, D>) -> FluxResult<Array<f64, D>>,
{
    let upper = flux_fn(&energy.mapv(|e| e * (1.0 + rel_delta)))?;
    let lower = flux_fn(&energy.mapv(|e| e * (1.0 - rel_delta)))?;
    let log_span = ((1.0 + rel_delta) / (1.0 - rel_delta)).log10();

    Ok(Zip::from(&upper)
        .and(&lower)
        .map_collect(|&up, &lo| (up / lo).log10() / log_span))
}

/// Spectral index of a single nucleus at lab energy.
pub fn nucleus_gamma<M, D>(
    model: &M,
    id: NucleusId,
    energy: &Array<f64, D>,
    rel_delta: f64,
) -> FluxResult<Array<f64, D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    spectral_index(|e| model.nucleus_flux_array(id, e), energy, rel_delta)
}

/// Spectral index of the all-nucleon flux at energy per nucleon.
pub fn nucleon_gamma<M, D>(
    model: &M,
    energy: &Array<f64, D>,
    rel_delta: f64,
) -> FluxResult<Array<f64, D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    spectral_index(|e| model.tot_nucleon_flux(e), energy, rel_delta)
}

/// Proton excess δ0 = (Φp − Φn)/(Φp + Φn) at energy per nucleon.
///
/// Uses the fixed reference groups He, C, Si, Fe (weighted by Z², at lab
/// energy 2Z·E) plus free protons, resolved through the model's own
/// nearest-nucleus fallback.
pub fn delta_0<M, D>(model: &M, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    let mut p_flux = model.nucleus_flux_array(NucleusId::PROTON, energy)?;
    let mut n_flux = Array::zeros(energy.raw_dim());

    for &(id, z) in PROTON_EXCESS_GROUPS.iter() {
        let lab_energy = energy.mapv(|e| e * 2.0 * z);
        let contrib = model.nucleus_flux_array(id, &lab_energy)? * (z * z);
        p_flux += &contrib;
        n_flux += &contrib;
    }

    Ok(Zip::from(&p_flux)
        .and(&n_flux)
        .map_collect(|&p, &n| (p - n) / (p + n)))
}

/// Proton fraction, proton flux and neutron flux at energy per nucleon.
pub fn p_and_n_flux<M, D>(model: &M, energy: &Array<f64, D>) -> FluxResult<NucleonFlux<D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    let mut proton = Array::zeros(energy.raw_dim());
    let mut neutron = Array::zeros(energy.raw_dim());

    for &id in model.nucleus_ids() {
        let (z, a) = id.z_a_f64();
        let lab_energy = energy.mapv(|e| e * a);
        let flux = model.nucleus_flux_array(id, &lab_energy)?;
        proton.scaled_add(z * a, &flux);
        neutron.scaled_add((a - z) * a, &flux);
    }

    let proton_fraction = Zip::from(&proton)
        .and(&neutron)
        .map_collect(|&p, &n| p / (p + n));

    Ok(NucleonFlux {
        proton_fraction,
        proton,
        neutron,
    })
}

/// Mean logarithmic mass ⟨ln A⟩ at lab energy per particle.
pub fn ln_a<M, D>(model: &M, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>>
where
    M: FluxModel + ?Sized,
    D: Dimension,
{
    let mut weighted = Array::zeros(energy.raw_dim());
    for &id in model.nucleus_ids() {
        // ln(1) = 0
        if id.is_proton() {
            continue;
        }
        let ln_mass = f64::from(id.mass_number()).ln();
        weighted.scaled_add(ln_mass, &model.nucleus_flux_array(id, energy)?);
    }

    let total = model.total_flux(energy)?;
    Ok(weighted / &total)
}
