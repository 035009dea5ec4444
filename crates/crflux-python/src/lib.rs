// ─────────────────────────────────────────────────────────────────────
// CRFlux — CRFlux Python
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PyO3 Python bindings for CRFlux.
//!
//! Exposes the primary flux models and their derived quantities to Python
//! via PyO3 + numpy. All energy arguments are 1-D float arrays.

use ndarray::Array1;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::exceptions::{PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crflux_models::spline_table::{spline_file_name, NucleonSplineTable};
use crflux_models::{FluxModel, PrimaryFlux};
use crflux_types::config::ModelConfig;
use crflux_types::constants::DEFAULT_REL_DELTA;
use crflux_types::error::FluxError;
use crflux_types::nucleus::NucleusId;

fn to_py_err(err: FluxError) -> PyErr {
    match err {
        FluxError::UnsupportedModelConfiguration { .. }
        | FluxError::NoSimilarNucleus { .. }
        | FluxError::Json(_) => PyValueError::new_err(err.to_string()),
        FluxError::DataProviderUnavailable(_) | FluxError::Io(_) => {
            PyIOError::new_err(err.to_string())
        }
        FluxError::TransitionNotFound { .. } => PyRuntimeError::new_err(err.to_string()),
    }
}

type PyFlux<'py> = PyResult<Bound<'py, PyArray1<f64>>>;

// ─── Flux model ───

/// Python-accessible primary cosmic-ray flux model.
#[pyclass(name = "PrimaryFlux")]
struct PyPrimaryFlux {
    inner: PrimaryFlux,
}

impl PyPrimaryFlux {
    fn energies(energy: &PyReadonlyArray1<'_, f64>) -> Array1<f64> {
        energy.as_array().to_owned()
    }
}

#[pymethods]
impl PyPrimaryFlux {
    /// Build a model by family name, e.g. `PrimaryFlux("HillasGaisser2012", "H3a")`.
    /// `include_heavy_in_total` adds the Te and Hg groups to GaisserStanevTilav.
    #[new]
    #[pyo3(signature = (model, option=None, include_heavy_in_total=false))]
    fn new(model: &str, option: Option<&str>, include_heavy_in_total: bool) -> PyResult<Self> {
        let config = ModelConfig::from_name(model, option)
            .and_then(|cfg| cfg.with_heavy_in_total(include_heavy_in_total))
            .map_err(to_py_err)?;
        let inner = PrimaryFlux::from_config(&config).map_err(to_py_err)?;
        Ok(PyPrimaryFlux { inner })
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name().to_string()
    }

    #[getter]
    fn sname(&self) -> String {
        self.inner.short_name().to_string()
    }

    #[getter]
    fn nucleus_ids(&self) -> Vec<u32> {
        self.inner.nucleus_ids().iter().map(|id| id.raw()).collect()
    }

    /// Flux of one nucleus at lab energies per nucleus.
    fn nucleus_flux<'py>(
        &self,
        py: Python<'py>,
        corsika_id: u32,
        energy: PyReadonlyArray1<'py, f64>,
    ) -> PyFlux<'py> {
        let flux = self
            .inner
            .nucleus_flux_array(NucleusId::new(corsika_id), &Self::energies(&energy))
            .map_err(to_py_err)?;
        Ok(flux.into_pyarray(py))
    }

    /// All-particle flux at lab energies per particle.
    fn total_flux<'py>(&self, py: Python<'py>, energy: PyReadonlyArray1<'py, f64>) -> PyFlux<'py> {
        let flux = self
            .inner
            .total_flux(&Self::energies(&energy))
            .map_err(to_py_err)?;
        Ok(flux.into_pyarray(py))
    }

    /// All-nucleon flux at energies per nucleon.
    fn tot_nucleon_flux<'py>(
        &self,
        py: Python<'py>,
        energy: PyReadonlyArray1<'py, f64>,
    ) -> PyFlux<'py> {
        let flux = self
            .inner
            .tot_nucleon_flux(&Self::energies(&energy))
            .map_err(to_py_err)?;
        Ok(flux.into_pyarray(py))
    }

    /// (proton fraction, proton flux, neutron flux) at energies per nucleon.
    #[allow(clippy::type_complexity)]
    fn p_and_n_flux<'py>(
        &self,
        py: Python<'py>,
        energy: PyReadonlyArray1<'py, f64>,
    ) -> PyResult<(
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
        Bound<'py, PyArray1<f64>>,
    )> {
        let pn = self
            .inner
            .p_and_n_flux(&Self::energies(&energy))
            .map_err(to_py_err)?;
        Ok((
            pn.proton_fraction.into_pyarray(py),
            pn.proton.into_pyarray(py),
            pn.neutron.into_pyarray(py),
        ))
    }

    /// Mean logarithmic mass <ln A>.
    #[pyo3(name = "lnA")]
    fn ln_a<'py>(&self, py: Python<'py>, energy: PyReadonlyArray1<'py, f64>) -> PyFlux<'py> {
        let ln_a = self.inner.ln_a(&Self::energies(&energy)).map_err(to_py_err)?;
        Ok(ln_a.into_pyarray(py))
    }

    /// Proton excess (p - n)/(p + n) at energies per nucleon.
    fn delta_0<'py>(&self, py: Python<'py>, energy: PyReadonlyArray1<'py, f64>) -> PyFlux<'py> {
        let d0 = self
            .inner
            .delta_0(&Self::energies(&energy))
            .map_err(to_py_err)?;
        Ok(d0.into_pyarray(py))
    }

    /// Local spectral index of one nucleus.
    #[pyo3(signature = (corsika_id, energy, rel_delta=DEFAULT_REL_DELTA))]
    fn nucleus_gamma<'py>(
        &self,
        py: Python<'py>,
        corsika_id: u32,
        energy: PyReadonlyArray1<'py, f64>,
        rel_delta: f64,
    ) -> PyFlux<'py> {
        let gamma = self
            .inner
            .nucleus_gamma(NucleusId::new(corsika_id), &Self::energies(&energy), rel_delta)
            .map_err(to_py_err)?;
        Ok(gamma.into_pyarray(py))
    }

    /// Local spectral index of the all-nucleon flux.
    #[pyo3(signature = (energy, rel_delta=DEFAULT_REL_DELTA))]
    fn nucleon_gamma<'py>(
        &self,
        py: Python<'py>,
        energy: PyReadonlyArray1<'py, f64>,
        rel_delta: f64,
    ) -> PyFlux<'py> {
        let gamma = self
            .inner
            .nucleon_gamma(&Self::energies(&energy), rel_delta)
            .map_err(to_py_err)?;
        Ok(gamma.into_pyarray(py))
    }

    /// Tabulate the nucleon flux into `directory` as `GSF_spline_<date_tag>.npz`.
    /// Returns the written path.
    #[pyo3(signature = (directory, date_tag, emin=1.0, emax=1e12, nbins=1000))]
    fn dump_nucleon_flux_splines(
        &self,
        directory: &str,
        date_tag: u32,
        emin: f64,
        emax: f64,
        nbins: usize,
    ) -> PyResult<String> {
        let table =
            NucleonSplineTable::tabulate(&self.inner, emin, emax, nbins).map_err(to_py_err)?;
        let path = std::path::Path::new(directory).join(spline_file_name(date_tag));
        table.write_npz(&path).map_err(to_py_err)?;
        Ok(path.to_string_lossy().into_owned())
    }
}

// ─── Standalone functions ───

/// Build a model from a JSON configuration file.
#[pyfunction]
fn model_from_json(path: &str) -> PyResult<PyPrimaryFlux> {
    let config = ModelConfig::from_file(path).map_err(to_py_err)?;
    let inner = PrimaryFlux::from_config(&config).map_err(to_py_err)?;
    Ok(PyPrimaryFlux { inner })
}

/// Latest `GSF_spline_*` file in a directory.
#[pyfunction]
fn latest_spline_file(directory: &str) -> PyResult<String> {
    let path = crflux_models::spline_table::latest_spline_file(std::path::Path::new(directory))
        .map_err(to_py_err)?;
    Ok(path.to_string_lossy().into_owned())
}

#[pymodule]
fn crflux_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPrimaryFlux>()?;
    m.add_function(wrap_pyfunction!(model_from_json, m)?)?;
    m.add_function(wrap_pyfunction!(latest_spline_file, m)?)?;
    Ok(())
}
