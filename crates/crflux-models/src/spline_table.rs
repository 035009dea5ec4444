// ─────────────────────────────────────────────────────────────────────
// CRFlux — Nucleon Spline Table
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Tabulated proton/neutron flux splines and their `.npz` persistence.
//!
//! Archive layout (all 1-D `f64`, equal length):
//! - `log_energy`: ln(E/GeV) knots, strictly increasing
//! - `proton_fraction`: Φp/(Φp+Φn)
//! - `log_proton_flux`, `log_neutron_flux`: ln Φ
//!
//! Files are named `GSF_spline_YYYYMMDD.npz`; the date tag orders them.

use crate::model::{FluxModel, NucleonFlux};
use crflux_math::grid::log_grid;
use crflux_math::spline::CubicSpline;
use crflux_types::error::{FluxError, FluxResult};
use ndarray::{Array, Array1, Dimension};
use ndarray_npy::{NpzReader, NpzWriter};
use std::fs::File;
use std::path::{Path, PathBuf};

const FILE_PREFIX: &str = "GSF_spline_";
const FILE_EXTENSION: &str = "npz";
/// Floor substituted for non-positive fluxes before taking the logarithm.
const FLUX_FLOOR: f64 = 1e-300;

const KEY_LOG_ENERGY: &str = "log_energy";
const KEY_PROTON_FRACTION: &str = "proton_fraction";
const KEY_LOG_PROTON: &str = "log_proton_flux";
const KEY_LOG_NEUTRON: &str = "log_neutron_flux";

/// Three splines over ln E describing the all-nucleon flux.
#[derive(Debug, Clone)]
pub struct NucleonSplineTable {
    proton_fraction: CubicSpline,
    log_proton_flux: CubicSpline,
    log_neutron_flux: CubicSpline,
}

impl NucleonSplineTable {
    /// Build from sampled curves; all arrays share the `log_energy` knots.
    pub fn from_samples(
        log_energy: &Array1<f64>,
        proton_fraction: &Array1<f64>,
        log_proton_flux: &Array1<f64>,
        log_neutron_flux: &Array1<f64>,
    ) -> FluxResult<Self> {
        let xs = log_energy.to_vec();
        let build = |name: &str, ys: &Array1<f64>| -> FluxResult<CubicSpline> {
            CubicSpline::try_new(xs.clone(), ys.to_vec()).map_err(|msg| {
                FluxError::DataProviderUnavailable(format!("spline '{name}': {msg}"))
            })
        };

        Ok(NucleonSplineTable {
            proton_fraction: build(KEY_PROTON_FRACTION, proton_fraction)?,
            log_proton_flux: build(KEY_LOG_PROTON, log_proton_flux)?,
            log_neutron_flux: build(KEY_LOG_NEUTRON, log_neutron_flux)?,
        })
    }

    /// Sample `model`'s proton/neutron decomposition on `nbins` log-spaced
    /// energies per nucleon in `[emin, emax]`.
    ///
    /// Negative proton fractions are clamped to 0 and non-positive fluxes to
    /// a tiny floor so that their logarithm stays finite.
    pub fn tabulate<M: FluxModel + ?Sized>(
        model: &M,
        emin: f64,
        emax: f64,
        nbins: usize,
    ) -> FluxResult<Self> {
        let egrid = log_grid(emin, emax, nbins);
        let NucleonFlux {
            mut proton_fraction,
            mut proton,
            mut neutron,
        } = model.p_and_n_flux(&egrid)?;

        let mut clamped = 0usize;
        proton_fraction.mapv_inplace(|v| {
            if v < 0.0 {
                clamped += 1;
                0.0
            } else {
                v
            }
        });
        for flux in [&mut proton, &mut neutron] {
            flux.mapv_inplace(|v| {
                if v <= 0.0 {
                    clamped += 1;
                    FLUX_FLOOR
                } else {
                    v
                }
            });
        }
        if clamped > 0 {
            log::warn!(
                "{}: clamped {clamped} non-physical samples while tabulating",
                model.short_name()
            );
        }

        Self::from_samples(
            &egrid.mapv(f64::ln),
            &proton_fraction,
            &proton.mapv(f64::ln),
            &neutron.mapv(f64::ln),
        )
    }

    /// Load a table written by [`NucleonSplineTable::write_npz`].
    pub fn from_npz(path: &Path) -> FluxResult<Self> {
        let unavailable = |what: String| {
            FluxError::DataProviderUnavailable(format!("{}: {what}", path.display()))
        };
        let file = File::open(path).map_err(|e| unavailable(e.to_string()))?;
        let mut npz = NpzReader::new(file).map_err(|e| unavailable(e.to_string()))?;

        let mut read = |key: &str| -> FluxResult<Array1<f64>> {
            npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(&format!("{key}.npy"))
                .or_else(|_| npz.by_name::<ndarray::OwnedRepr<f64>, ndarray::Ix1>(key))
                .map_err(|e| unavailable(format!("failed to read {key}: {e}")))
        };
        let log_energy = read(KEY_LOG_ENERGY)?;
        let proton_fraction = read(KEY_PROTON_FRACTION)?;
        let log_proton_flux = read(KEY_LOG_PROTON)?;
        let log_neutron_flux = read(KEY_LOG_NEUTRON)?;

        let table = Self::from_samples(
            &log_energy,
            &proton_fraction,
            &log_proton_flux,
            &log_neutron_flux,
        )?;
        log::debug!(
            "loaded {} spline knots from {}",
            log_energy.len(),
            path.display()
        );
        Ok(table)
    }

    /// Persist the knots as a compressed `.npz` archive.
    pub fn write_npz(&self, path: &Path) -> FluxResult<()> {
        let to_io = |e: ndarray_npy::WriteNpzError| {
            FluxError::Io(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
        };
        let file = File::create(path)?;
        let mut writer = NpzWriter::new_compressed(file);
        writer
            .add_array(KEY_LOG_ENERGY, &Array1::from(self.knots().to_vec()))
            .map_err(to_io)?;
        for (key, spline) in [
            (KEY_PROTON_FRACTION, &self.proton_fraction),
            (KEY_LOG_PROTON, &self.log_proton_flux),
            (KEY_LOG_NEUTRON, &self.log_neutron_flux),
        ] {
            writer
                .add_array(key, &Array1::from(spline.values().to_vec()))
                .map_err(to_io)?;
        }
        writer.finish().map_err(to_io)?;
        Ok(())
    }

    /// ln(E) knots shared by all three splines.
    pub fn knots(&self) -> &[f64] {
        self.proton_fraction.knots()
    }

    /// Proton fraction, proton flux and neutron flux at energy per nucleon.
    ///
    /// Outside the tabulated range the splines evaluate to 0, so the
    /// fraction is 0 and both fluxes are exp(0) = 1.
    pub fn evaluate<D: Dimension>(&self, energy: &Array<f64, D>) -> NucleonFlux<D> {
        let log_e = energy.mapv(f64::ln);
        NucleonFlux {
            proton_fraction: self.proton_fraction.evaluate_array(&log_e),
            proton: self.log_proton_flux.evaluate_array(&log_e).mapv(f64::exp),
            neutron: self.log_neutron_flux.evaluate_array(&log_e).mapv(f64::exp),
        }
    }
}

/// Canonical file name for a table produced on `tag` (`YYYYMMDD`).
pub fn spline_file_name(tag: u32) -> String {
    format!("{FILE_PREFIX}{tag:08}.{FILE_EXTENSION}")
}

/// Date tag of a `GSF_spline_YYYYMMDD.npz` file name. Other extensions
/// (e.g. legacy pickles) are not loadable and yield `None`.
pub fn date_tag(file_name: &str) -> Option<u32> {
    let rest = file_name.strip_prefix(FILE_PREFIX)?;
    let (tag, extension) = rest.split_once('.')?;
    if extension != FILE_EXTENSION || tag.is_empty() || !tag.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tag.parse().ok()
}

/// Most recent spline table in `dir`, by date tag.
pub fn latest_spline_file(dir: &Path) -> FluxResult<PathBuf> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        FluxError::DataProviderUnavailable(format!("{}: {e}", dir.display()))
    })?;

    let mut latest: Option<(u32, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(tag) = name.to_str().and_then(date_tag) else {
            continue;
        };
        if latest.as_ref().map_or(true, |(best, _)| tag >= *best) {
            latest = Some((tag, entry.path()));
        }
    }

    match latest {
        Some((tag, path)) => {
            log::info!("using spline table {} (tag {tag})", path.display());
            Ok(path)
        }
        None => Err(FluxError::DataProviderUnavailable(format!(
            "no {FILE_PREFIX}*.{FILE_EXTENSION} files found in {}",
            dir.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_dir(label: &str) -> PathBuf {
        let epoch_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "crflux_{label}_{}_{}",
            std::process::id(),
            epoch_ns
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn linear_table() -> NucleonSplineTable {
        let log_e = array![0.0, 1.0, 2.0, 3.0];
        NucleonSplineTable::from_samples(
            &log_e,
            &array![0.9, 0.85, 0.8, 0.75],
            &array![-1.0, -3.0, -5.0, -7.0],
            &array![-3.0, -5.0, -7.0, -9.0],
        )
        .unwrap()
    }

    #[test]
    fn test_file_name_and_tag() {
        assert_eq!(spline_file_name(20170705), "GSF_spline_20170705.npz");
        assert_eq!(date_tag("GSF_spline_20170705.npz"), Some(20170705));
        assert_eq!(date_tag("GSF_spline_20170705.pkl.bz2"), None);
        assert_eq!(date_tag("GSF_spline_20170705.npz.bak"), None);
        assert_eq!(date_tag("GSF_spline_20170705"), None);
        assert_eq!(date_tag("GSF_spline_latest.npz"), None);
        assert_eq!(date_tag("other_20170705.npz"), None);
    }

    #[test]
    fn test_evaluate_inside_and_outside() {
        let table = linear_table();
        let e = array![1.0, 1f64.exp(), 1e6];
        let pn = table.evaluate(&e);
        assert!((pn.proton_fraction[0] - 0.9).abs() < 1e-12);
        assert!((pn.proton[1] - (-3.0f64).exp()).abs() < 1e-12);
        // ln(1e6) ≈ 13.8 lies outside the knots.
        assert_eq!(pn.proton_fraction[2], 0.0);
        assert_eq!(pn.proton[2], 1.0);
        assert_eq!(pn.neutron[2], 1.0);
    }

    #[test]
    fn test_from_samples_rejects_bad_knots() {
        let res = NucleonSplineTable::from_samples(
            &array![0.0, 0.0],
            &array![0.5, 0.5],
            &array![0.0, 0.0],
            &array![0.0, 0.0],
        );
        assert!(matches!(res, Err(FluxError::DataProviderUnavailable(_))));
    }

    #[test]
    fn test_npz_roundtrip() {
        let dir = scratch_dir("spline_roundtrip");
        let path = dir.join(spline_file_name(20240101));
        let table = linear_table();
        table.write_npz(&path).unwrap();

        let loaded = NucleonSplineTable::from_npz(&path).unwrap();
        assert_eq!(loaded.knots(), table.knots());
        let e = array![2.0, 10.0];
        let a = table.evaluate(&e);
        let b = loaded.evaluate(&e);
        for i in 0..e.len() {
            assert!((a.proton[i] - b.proton[i]).abs() < 1e-15);
            assert!((a.neutron[i] - b.neutron[i]).abs() < 1e-15);
        }
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = scratch_dir("spline_missing");
        let res = NucleonSplineTable::from_npz(&dir.join("GSF_spline_19990101.npz"));
        assert!(matches!(res, Err(FluxError::DataProviderUnavailable(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_latest_spline_file_picks_newest() {
        let dir = scratch_dir("spline_latest");
        for name in [
            "GSF_spline_20170705.npz",
            "GSF_spline_20190101.npz",
            "GSF_spline_20180312.pkl.bz2",
            "GSF_spline_20210101.pkl.bz2",
            "README.txt",
        ] {
            File::create(dir.join(name)).unwrap();
        }
        let latest = latest_spline_file(&dir).unwrap();
        assert_eq!(
            latest.file_name().and_then(|n| n.to_str()),
            Some("GSF_spline_20190101.npz")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_newer_legacy_file_does_not_hide_table() {
        let dir = scratch_dir("spline_legacy");
        linear_table()
            .write_npz(&dir.join(spline_file_name(20200101)))
            .unwrap();
        File::create(dir.join("GSF_spline_20210101.pkl.bz2")).unwrap();

        let latest = latest_spline_file(&dir).unwrap();
        assert_eq!(
            latest.file_name().and_then(|n| n.to_str()),
            Some("GSF_spline_20200101.npz")
        );
        assert!(NucleonSplineTable::from_npz(&latest).is_ok());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_latest_spline_file_empty_dir() {
        let dir = scratch_dir("spline_empty");
        assert!(matches!(
            latest_spline_file(&dir),
            Err(FluxError::DataProviderUnavailable(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
