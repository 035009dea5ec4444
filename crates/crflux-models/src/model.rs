// ─────────────────────────────────────────────────────────────────────
// CRFlux — Flux Model Interface
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Common interface of all primary flux models.
//!
//! Energies are laboratory GeV per nucleus unless a method says otherwise.
//! Array queries accept any dimension and return the same shape; derived
//! quantities at a single energy go through `ndarray::arr0`.

use crate::derived;
use crflux_types::constants::MAX_DELTA_A;
use crflux_types::error::{FluxError, FluxResult};
use crflux_types::nucleus::{nearest_supported, NucleusId};
use ndarray::{Array, Array1, Dimension};

/// Proton fraction, proton flux and neutron flux at nucleon energies.
#[derive(Debug, Clone)]
pub struct NucleonFlux<D: Dimension> {
    pub proton_fraction: Array<f64, D>,
    pub proton: Array<f64, D>,
    pub neutron: Array<f64, D>,
}

impl<D: Dimension> NucleonFlux<D> {
    /// Proton plus neutron flux.
    pub fn total(&self) -> Array<f64, D> {
        &self.proton + &self.neutron
    }
}

/// Flux of cosmic-ray nuclei at the top of the atmosphere.
///
/// Implementors supply `nucleus_flux` and the list of nuclei they are
/// parametrised for; everything else has generic defaults in
/// [`crate::derived`] that table-driven models may override.
pub trait FluxModel {
    /// Long, human-readable model name.
    fn name(&self) -> &str;

    /// Short label, e.g. `"H3a"`.
    fn short_name(&self) -> &str;

    /// Nuclei the model can evaluate; derived quantities sum over these.
    fn nucleus_ids(&self) -> &[NucleusId];

    /// Flux of a single nucleus species (m² s sr GeV)⁻¹ at lab energy `energy`.
    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64>;

    /// Element-wise [`FluxModel::nucleus_flux`] preserving the input shape.
    fn nucleus_flux_array<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        map_energies(energy, |e| self.nucleus_flux(id, e))
    }

    /// All-particle flux at lab energy per particle.
    fn total_flux<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>> {
        derived::total_flux(self, energy)
    }

    /// All-nucleon flux at energy per nucleon.
    fn tot_nucleon_flux<D: Dimension>(
        &self,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        derived::tot_nucleon_flux(self, energy)
    }

    /// Proton/neutron decomposition of the nucleon flux.
    fn p_and_n_flux<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<NucleonFlux<D>> {
        derived::p_and_n_flux(self, energy)
    }

    /// Mean logarithmic mass ⟨ln A⟩.
    fn ln_a<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>> {
        derived::ln_a(self, energy)
    }

    /// Proton excess (Φp − Φn)/(Φp + Φn).
    fn delta_0<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>> {
        derived::delta_0(self, energy)
    }

    /// Local spectral index of one nucleus.
    fn nucleus_gamma<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
        rel_delta: f64,
    ) -> FluxResult<Array<f64, D>> {
        derived::nucleus_gamma(self, id, energy, rel_delta)
    }

    /// Local spectral index of the all-nucleon flux.
    fn nucleon_gamma<D: Dimension>(
        &self,
        energy: &Array<f64, D>,
        rel_delta: f64,
    ) -> FluxResult<Array<f64, D>> {
        derived::nucleon_gamma(self, energy, rel_delta)
    }
}

/// Per-nucleus parameter records in declaration order.
#[derive(Debug, Clone)]
pub struct ParamTable<P> {
    ids: Vec<NucleusId>,
    entries: Vec<P>,
}

impl<P> ParamTable<P> {
    pub fn new(rows: Vec<(NucleusId, P)>) -> Self {
        let (ids, entries) = rows.into_iter().unzip();
        ParamTable { ids, entries }
    }

    pub fn ids(&self) -> &[NucleusId] {
        &self.ids
    }

    pub fn get(&self, id: NucleusId) -> Option<&P> {
        self.ids
            .iter()
            .position(|&cand| cand == id)
            .map(|idx| &self.entries[idx])
    }

    /// Resolve `id` through the nearest-nucleus fallback and return the
    /// identifier actually used together with its parameters.
    pub fn resolve(&self, id: NucleusId) -> FluxResult<(NucleusId, &P)> {
        let found = nearest_supported(id, &self.ids, MAX_DELTA_A)?;
        self.get(found)
            .map(|params| (found, params))
            .ok_or_else(|| FluxError::NoSimilarNucleus {
                requested_a: id.mass_number(),
                closest_a: found.mass_number(),
                max_delta_a: MAX_DELTA_A,
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (NucleusId, &P)> {
        self.ids.iter().copied().zip(self.entries.iter())
    }
}

/// Apply a fallible scalar function element-wise, keeping the shape.
pub fn map_energies<D, F>(energy: &Array<f64, D>, mut f: F) -> FluxResult<Array<f64, D>>
where
    D: Dimension,
    F: FnMut(f64) -> FluxResult<f64>,
{
    let mut out = Array::zeros(energy.raw_dim());
    for (o, &e) in out.iter_mut().zip(energy.iter()) {
        *o = f(e)?;
    }
    Ok(out)
}

/// Evaluate a piecewise model on arbitrary-shaped energies.
///
/// Energies below `threshold` go to `low`, the rest to `high`; each segment
/// is evaluated as one 1-D batch and the results are scattered back into
/// the original element order.
pub fn split_at_threshold<D, L, H>(
    energy: &Array<f64, D>,
    threshold: f64,
    low: L,
    high: H,
) -> FluxResult<Array<f64, D>>
where
    D: Dimension,
    L: FnOnce(&Array1<f64>) -> FluxResult<Array1<f64>>,
    H: FnOnce(&Array1<f64>) -> FluxResult<Array1<f64>>,
{
    let mut low_idx = Vec::new();
    let mut high_idx = Vec::new();
    let mut low_e = Vec::new();
    let mut high_e = Vec::new();
    for (i, &e) in energy.iter().enumerate() {
        if e < threshold {
            low_idx.push(i);
            low_e.push(e);
        } else {
            high_idx.push(i);
            high_e.push(e);
        }
    }

    let low_flux = low(&Array1::from(low_e))?;
    let high_flux = high(&Array1::from(high_e))?;

    let mut flat = vec![0.0; energy.len()];
    for (&i, &v) in low_idx.iter().zip(low_flux.iter()) {
        flat[i] = v;
    }
    for (&i, &v) in high_idx.iter().zip(high_flux.iter()) {
        flat[i] = v;
    }

    let mut out = Array::zeros(energy.raw_dim());
    for (o, v) in out.iter_mut().zip(flat) {
        *o = v;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, array};

    #[test]
    fn test_param_table_order_and_lookup() {
        let table = ParamTable::new(vec![
            (NucleusId::PROTON, 1.0),
            (NucleusId::HELIUM, 2.0),
            (NucleusId::IRON, 3.0),
        ]);
        assert_eq!(
            table.ids(),
            &[NucleusId::PROTON, NucleusId::HELIUM, NucleusId::IRON]
        );
        assert_eq!(table.get(NucleusId::HELIUM), Some(&2.0));
        assert_eq!(table.get(NucleusId::CARBON), None);

        let (found, value) = table.resolve(NucleusId::new(5626)).unwrap();
        assert_eq!(found, NucleusId::IRON);
        assert_eq!(*value, 3.0);
        assert!(table.resolve(NucleusId::CARBON).is_err());
    }

    #[test]
    fn test_map_energies_keeps_shape() {
        let e = array![[1.0, 2.0], [3.0, 4.0]];
        let out = map_energies(&e, |x| Ok(x * 10.0)).unwrap();
        assert_eq!(out, array![[10.0, 20.0], [30.0, 40.0]]);

        let scalar = map_energies(&arr0(5.0), |x| Ok(x + 1.0)).unwrap();
        assert_eq!(scalar[()], 6.0);
    }

    #[test]
    fn test_map_energies_propagates_error() {
        let e = array![1.0, 2.0];
        let res = map_energies(&e, |x| {
            if x > 1.5 {
                Err(FluxError::DataProviderUnavailable("test".into()))
            } else {
                Ok(x)
            }
        });
        assert!(res.is_err());
    }

    #[test]
    fn test_split_reassembles_in_order() {
        let e = array![500.0, 10.0, 300.0, 20.0, 1000.0];
        let out = split_at_threshold(
            &e,
            300.0,
            |lo| Ok(lo.mapv(|x| -x)),
            |hi| Ok(hi.mapv(|x| x)),
        )
        .unwrap();
        assert_eq!(out, array![500.0, -10.0, 300.0, -20.0, 1000.0]);
    }

    #[test]
    fn test_split_two_dimensional() {
        let e = array![[1.0, 5.0], [6.0, 2.0]];
        let out = split_at_threshold(&e, 4.0, |lo| Ok(lo * 0.0), |hi| Ok(hi * 1.0)).unwrap();
        assert_eq!(out, array![[0.0, 5.0], [6.0, 0.0]]);
    }
}
