// ─────────────────────────────────────────────────────────────────────
// CRFlux — Nucleus Codec
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! CORSIKA-style nucleus identifiers.
//!
//! A nucleus with charge Z and mass number A is encoded as `100·A + Z`.
//! Protons keep the historical CORSIKA code 14 instead of 101; decoding
//! special-cases that value.

use crate::error::{FluxError, FluxResult};
use std::fmt;

/// Reserved identifier of the proton.
const PROTON_CODE: u32 = 14;

/// Composite charge/mass identifier of a cosmic-ray nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NucleusId(u32);

impl NucleusId {
    pub const PROTON: NucleusId = NucleusId(PROTON_CODE);
    pub const HELIUM: NucleusId = NucleusId(402);
    pub const CARBON: NucleusId = NucleusId(1206);
    pub const NITROGEN: NucleusId = NucleusId(1407);
    pub const OXYGEN: NucleusId = NucleusId(1608);
    pub const SILICON: NucleusId = NucleusId(2814);
    pub const IRON: NucleusId = NucleusId(5426);

    /// Wrap a raw identifier without validation.
    pub const fn new(raw: u32) -> Self {
        NucleusId(raw)
    }

    /// Encode charge and mass number.
    pub fn from_z_a(z: u32, a: u32) -> Self {
        if z == 1 && a == 1 {
            NucleusId::PROTON
        } else {
            NucleusId(100 * a + z)
        }
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn is_proton(self) -> bool {
        self.0 == PROTON_CODE
    }

    /// Decode into `(Z, A)`.
    pub const fn z_a(self) -> (u32, u32) {
        if self.0 == PROTON_CODE {
            return (1, 1);
        }
        let z = self.0 % 100;
        (z, (self.0 - z) / 100)
    }

    pub const fn charge(self) -> u32 {
        self.z_a().0
    }

    pub const fn mass_number(self) -> u32 {
        self.z_a().1
    }

    /// Charge and mass number as floats, for use inside flux formulas.
    pub fn z_a_f64(self) -> (f64, f64) {
        let (z, a) = self.z_a();
        (z as f64, a as f64)
    }
}

impl From<u32> for NucleusId {
    fn from(raw: u32) -> Self {
        NucleusId(raw)
    }
}

impl From<NucleusId> for u32 {
    fn from(id: NucleusId) -> Self {
        id.0
    }
}

impl fmt::Display for NucleusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resolve `id` against the nuclei a model is parametrised for.
///
/// Exact members are returned unchanged. Otherwise the numerically closest
/// identifier is taken (first one on ties) and accepted only if its mass
/// number lies within `max_delta_a` of the requested one. Grouping nearby
/// mass numbers onto one parametrised mass group is intended physics.
pub fn nearest_supported(
    id: NucleusId,
    supported: &[NucleusId],
    max_delta_a: u32,
) -> FluxResult<NucleusId> {
    if supported.contains(&id) {
        return Ok(id);
    }

    let requested_a = id.mass_number();
    let closest = supported
        .iter()
        .copied()
        .min_by_key(|cand| (i64::from(cand.raw()) - i64::from(id.raw())).abs());

    match closest {
        Some(cand) if cand.mass_number().abs_diff(requested_a) <= max_delta_a => {
            log::debug!("nucleus {id} not parametrised, substituting {cand}");
            Ok(cand)
        }
        other => Err(FluxError::NoSimilarNucleus {
            requested_a,
            closest_a: other.map_or(0, NucleusId::mass_number),
            max_delta_a,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H3A_GROUPS: [NucleusId; 5] = [
        NucleusId::PROTON,
        NucleusId::HELIUM,
        NucleusId::CARBON,
        NucleusId::SILICON,
        NucleusId::IRON,
    ];

    #[test]
    fn test_proton_sentinel() {
        assert_eq!(NucleusId::from_z_a(1, 1).raw(), 14);
        assert_eq!(NucleusId::PROTON.z_a(), (1, 1));
        assert!(NucleusId::new(14).is_proton());
    }

    #[test]
    fn test_encode_decode_nuclei() {
        assert_eq!(NucleusId::from_z_a(2, 4), NucleusId::HELIUM);
        assert_eq!(NucleusId::from_z_a(26, 54), NucleusId::IRON);
        assert_eq!(NucleusId::new(5426).z_a(), (26, 54));
        assert_eq!(NucleusId::new(12852).z_a(), (52, 128));
        // The plain encoding of a proton still decodes to Z=1, A=1.
        assert_eq!(NucleusId::new(101).z_a(), (1, 1));
    }

    #[test]
    fn test_nearest_exact_member() {
        let got = nearest_supported(NucleusId::CARBON, &H3A_GROUPS, 3).unwrap();
        assert_eq!(got, NucleusId::CARBON);
    }

    #[test]
    fn test_nearest_substitutes_within_tolerance() {
        // N-14 falls back onto the CNO group represented by C-12.
        let got = nearest_supported(NucleusId::new(1407), &H3A_GROUPS, 3).unwrap();
        assert_eq!(got, NucleusId::CARBON);

        let got = nearest_supported(NucleusId::new(5526), &H3A_GROUPS, 3).unwrap();
        assert_eq!(got, NucleusId::IRON);
    }

    #[test]
    fn test_nearest_plain_proton_code() {
        let got = nearest_supported(NucleusId::new(101), &H3A_GROUPS, 3).unwrap();
        assert_eq!(got, NucleusId::PROTON);
    }

    #[test]
    fn test_nearest_rejects_far_nucleus() {
        // O-16 is 4 units from C-12 and far from Si-28.
        let err = nearest_supported(NucleusId::OXYGEN, &H3A_GROUPS, 3).unwrap_err();
        match err {
            FluxError::NoSimilarNucleus {
                requested_a,
                closest_a,
                max_delta_a,
            } => {
                assert_eq!(requested_a, 16);
                assert_eq!(closest_a, 12);
                assert_eq!(max_delta_a, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nearest_empty_set_fails() {
        assert!(nearest_supported(NucleusId::PROTON, &[], 3).is_err());
    }
}
