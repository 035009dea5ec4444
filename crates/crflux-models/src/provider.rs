// ─────────────────────────────────────────────────────────────────────
// CRFlux — External Data Provider
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Seam for data-driven flux fits evaluated outside this crate.
//!
//! A provider is keyed by nuclear charge and a calibration interval; it
//! knows nothing about nucleus identifiers.

use crflux_types::error::FluxResult;
use std::fmt;

/// Time window of the measurements a fit is calibrated to, as `yyyymm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationInterval {
    pub start: u32,
    pub end: u32,
}

impl CalibrationInterval {
    pub const fn new(start: u32, end: u32) -> Self {
        CalibrationInterval { start, end }
    }
}

impl fmt::Display for CalibrationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Element-resolved flux fit.
pub trait ExternalFluxProvider: Send + Sync + fmt::Debug {
    /// Element table: charge → mean mass number.
    fn elements(&self) -> FluxResult<Vec<(u32, f64)>>;

    /// Flux of element `charge` at lab energy per nucleus.
    fn eflux(&self, charge: u32, energy: f64, interval: CalibrationInterval) -> f64;

    /// Proton and neutron flux carried by element `charge` at energy per nucleon.
    fn nucleon_flux(&self, charge: u32, energy: f64, interval: CalibrationInterval) -> (f64, f64);
}
