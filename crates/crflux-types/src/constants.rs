// ─────────────────────────────────────────────────────────────────────
// CRFlux — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Electron mass (GeV).
pub const ELECTRON_MASS_GEV: f64 = 0.511e-3;

/// Nucleon mass used by the Zatsepin-Sokolskaya rigidity transform (GeV).
/// NOTE: the published fit uses 0.983, not the PDG proton mass.
pub const ZS_NUCLEON_MASS_GEV: f64 = 0.983;

/// Solar modulation scale applied per unit charge below the ZS threshold.
pub const ZS_MODULATION_SCALE: f64 = 0.6;

/// Lab energy (GeV) below which the ZS modulation correction is applied.
pub const ZS_MODULATION_THRESHOLD_GEV: f64 = 300.0;

/// Maximum mass-number distance accepted by the nearest-nucleus fallback.
pub const MAX_DELTA_A: u32 = 3;

/// Default relative step of the numerical spectral-index derivative.
pub const DEFAULT_REL_DELTA: f64 = 0.01;
