// ─────────────────────────────────────────────────────────────────────
// CRFlux — Primary Flux Selection
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed set of flux models, selectable at runtime from configuration.

use crate::model::{FluxModel, NucleonFlux};
use crate::models::combined::CombinedGhAndHg;
use crate::models::gaisser_honda::GaisserHonda;
use crate::models::gaisser_stanev_tilav::GaisserStanevTilav;
use crate::models::global_spline_fit::{GlobalSplineFit, GlobalSplineFitBeta};
use crate::models::hillas_gaisser::HillasGaisser2012;
use crate::models::poly_gonato::PolyGonato;
use crate::models::thunman::{SimplePowerlaw27, Thunman};
use crate::models::zatsepin_sokolskaya::ZatsepinSokolskaya;
use crate::provider::ExternalFluxProvider;
use crflux_types::config::ModelConfig;
use crflux_types::error::FluxResult;
use crflux_types::nucleus::NucleusId;
use ndarray::{Array, Dimension};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub enum PrimaryFlux {
    PolyGonato(PolyGonato),
    /// Also holds the poly-gonato flavour of H3a/H4a.
    HillasGaisser2012(HillasGaisser2012),
    GaisserStanevTilav(GaisserStanevTilav),
    CombinedGhAndHg(CombinedGhAndHg),
    ZatsepinSokolskaya(ZatsepinSokolskaya),
    GaisserHonda(GaisserHonda),
    Thunman(Thunman),
    SimplePowerlaw27(SimplePowerlaw27),
    GlobalSplineFit(GlobalSplineFit),
    GlobalSplineFitBeta(GlobalSplineFitBeta),
}

macro_rules! dispatch {
    ($self:expr, $model:ident => $body:expr) => {
        match $self {
            PrimaryFlux::PolyGonato($model) => $body,
            PrimaryFlux::HillasGaisser2012($model) => $body,
            PrimaryFlux::GaisserStanevTilav($model) => $body,
            PrimaryFlux::CombinedGhAndHg($model) => $body,
            PrimaryFlux::ZatsepinSokolskaya($model) => $body,
            PrimaryFlux::GaisserHonda($model) => $body,
            PrimaryFlux::Thunman($model) => $body,
            PrimaryFlux::SimplePowerlaw27($model) => $body,
            PrimaryFlux::GlobalSplineFit($model) => $body,
            PrimaryFlux::GlobalSplineFitBeta($model) => $body,
        }
    };
}

impl PrimaryFlux {
    /// Build the model a configuration record describes.
    ///
    /// Sub-variant strings are parsed here; an unknown one fails with
    /// `UnsupportedModelConfiguration`.
    pub fn from_config(config: &ModelConfig) -> FluxResult<Self> {
        let model = match config {
            ModelConfig::PolyGonato { constdelta } => {
                PrimaryFlux::PolyGonato(PolyGonato::new(*constdelta))
            }
            ModelConfig::HillasGaisser2012 { variant } => {
                PrimaryFlux::HillasGaisser2012(HillasGaisser2012::from_option(variant)?)
            }
            ModelConfig::H3aPolygonato { variant } => PrimaryFlux::HillasGaisser2012(
                HillasGaisser2012::with_poly_gonato(variant.parse()?),
            ),
            ModelConfig::GaisserStanevTilav {
                variant,
                include_heavy_in_total,
            } => PrimaryFlux::GaisserStanevTilav(GaisserStanevTilav::from_option(
                variant,
                *include_heavy_in_total,
            )?),
            ModelConfig::CombinedGhAndHg { variant } => {
                PrimaryFlux::CombinedGhAndHg(CombinedGhAndHg::from_option(variant)?)
            }
            ModelConfig::ZatsepinSokolskaya { variant } => {
                PrimaryFlux::ZatsepinSokolskaya(ZatsepinSokolskaya::from_option(variant)?)
            }
            ModelConfig::GaisserHonda => PrimaryFlux::GaisserHonda(GaisserHonda::new()),
            ModelConfig::Thunman => PrimaryFlux::Thunman(Thunman::new()),
            ModelConfig::SimplePowerlaw27 => PrimaryFlux::SimplePowerlaw27(SimplePowerlaw27::new()),
            ModelConfig::GlobalSplineFitBeta { spline_path } => {
                PrimaryFlux::GlobalSplineFitBeta(GlobalSplineFitBeta::from_file(spline_path)?)
            }
        };
        log::debug!("selected primary flux model '{}'", model.name());
        Ok(model)
    }

    /// Shorthand for `from_config(&ModelConfig::from_name(model, option)?)`.
    pub fn from_name(model: &str, option: Option<&str>) -> FluxResult<Self> {
        Self::from_config(&ModelConfig::from_name(model, option)?)
    }

    /// Provider-backed global spline fit; not expressible as a config record.
    pub fn global_spline_fit(provider: Arc<dyn ExternalFluxProvider>) -> FluxResult<Self> {
        Ok(PrimaryFlux::GlobalSplineFit(GlobalSplineFit::new(provider)?))
    }
}

impl FluxModel for PrimaryFlux {
    fn name(&self) -> &str {
        dispatch!(self, m => m.name())
    }

    fn short_name(&self) -> &str {
        dispatch!(self, m => m.short_name())
    }

    fn nucleus_ids(&self) -> &[NucleusId] {
        dispatch!(self, m => m.nucleus_ids())
    }

    fn nucleus_flux(&self, id: NucleusId, energy: f64) -> FluxResult<f64> {
        dispatch!(self, m => m.nucleus_flux(id, energy))
    }

    fn nucleus_flux_array<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.nucleus_flux_array(id, energy))
    }

    fn total_flux<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.total_flux(energy))
    }

    fn tot_nucleon_flux<D: Dimension>(
        &self,
        energy: &Array<f64, D>,
    ) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.tot_nucleon_flux(energy))
    }

    fn p_and_n_flux<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<NucleonFlux<D>> {
        dispatch!(self, m => m.p_and_n_flux(energy))
    }

    fn ln_a<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.ln_a(energy))
    }

    fn delta_0<D: Dimension>(&self, energy: &Array<f64, D>) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.delta_0(energy))
    }

    fn nucleus_gamma<D: Dimension>(
        &self,
        id: NucleusId,
        energy: &Array<f64, D>,
        rel_delta: f64,
    ) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.nucleus_gamma(id, energy, rel_delta))
    }

    fn nucleon_gamma<D: Dimension>(
        &self,
        energy: &Array<f64, D>,
        rel_delta: f64,
    ) -> FluxResult<Array<f64, D>> {
        dispatch!(self, m => m.nucleon_gamma(energy, rel_delta))
    }
}

macro_rules! impl_from_model {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for PrimaryFlux {
                fn from(model: $variant) -> Self {
                    PrimaryFlux::$variant(model)
                }
            }
        )*
    };
}

impl_from_model!(
    PolyGonato,
    HillasGaisser2012,
    GaisserStanevTilav,
    CombinedGhAndHg,
    ZatsepinSokolskaya,
    GaisserHonda,
    Thunman,
    SimplePowerlaw27,
    GlobalSplineFit,
    GlobalSplineFitBeta,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crflux_types::error::FluxError;
    use ndarray::array;

    #[test]
    fn test_from_name_for_every_family() {
        let cases = [
            ("PolyGonato", None, "pg"),
            ("PolyGonato", Some("constdelta"), "pg"),
            ("HillasGaisser2012", None, "H4a"),
            ("HillasGaisser2012", Some("H3a"), "H3a"),
            ("H3aPolygonato", Some("H4a"), "H4a"),
            ("GaisserStanevTilav", Some("4-gen"), "GST4"),
            ("CombinedGHandHG", Some("H4a"), "cH4a"),
            ("ZatsepinSokolskaya", Some("default"), "ZS"),
            ("GaisserHonda", None, "GH"),
            ("Thunman", None, "TIG"),
            ("SimplePowerlaw27", None, "E^-2.7"),
        ];
        for (family, option, short) in cases {
            let model = PrimaryFlux::from_name(family, option).unwrap();
            assert_eq!(model.short_name(), short, "{family} {option:?}");
        }
    }

    #[test]
    fn test_unknown_variant_fails_at_construction() {
        for (family, option) in [
            ("HillasGaisser2012", "H5a"),
            ("H3aPolygonato", "H9"),
            ("GaisserStanevTilav", "2-gen"),
            ("CombinedGHandHG", "GST"),
            ("ZatsepinSokolskaya", "fermi"),
        ] {
            assert!(matches!(
                PrimaryFlux::from_name(family, Some(option)),
                Err(FluxError::UnsupportedModelConfiguration { .. })
            ));
        }
    }

    #[test]
    fn test_gst_heavy_groups_from_name() {
        let cfg = ModelConfig::from_name("GaisserStanevTilav", Some("3-gen"))
            .unwrap()
            .with_heavy_in_total(true)
            .unwrap();
        let heavy = PrimaryFlux::from_config(&cfg).unwrap();
        let plain = PrimaryFlux::from_name("GaisserStanevTilav", Some("3-gen")).unwrap();
        assert_eq!(heavy.nucleus_ids().len(), plain.nucleus_ids().len() + 2);
    }

    #[test]
    fn test_missing_spline_file() {
        let cfg = ModelConfig::GlobalSplineFitBeta {
            spline_path: std::env::temp_dir().join("crflux_no_such_table.npz"),
        };
        assert!(matches!(
            PrimaryFlux::from_config(&cfg),
            Err(FluxError::DataProviderUnavailable(_))
        ));
    }

    #[test]
    fn test_dispatch_preserves_overrides() {
        let direct = Thunman::new();
        let wrapped = PrimaryFlux::from(direct.clone());
        let e = array![1e3, 1e7];
        assert_eq!(
            wrapped.nucleus_flux_array(NucleusId::PROTON, &e).unwrap(),
            direct.nucleus_flux_array(NucleusId::PROTON, &e).unwrap()
        );
        assert_eq!(wrapped.nucleus_ids(), direct.nucleus_ids());
    }
}
