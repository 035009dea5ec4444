// ─────────────────────────────────────────────────────────────────────
// CRFlux — Model Scenario Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! End-to-end checks through the public `PrimaryFlux` surface.

use crflux_models::spline_table::{spline_file_name, NucleonSplineTable};
use crflux_models::{FluxModel, PrimaryFlux};
use crflux_types::config::ModelConfig;
use crflux_types::error::FluxError;
use crflux_types::nucleus::NucleusId;
use ndarray::{arr0, array, Array1};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn scratch_dir(label: &str) -> PathBuf {
    let epoch_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "crflux_scenario_{label}_{}_{}",
        std::process::id(),
        epoch_ns
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn gst_four_gen_proton_at_1e9() {
    let model = PrimaryFlux::from_name("GaisserStanevTilav", Some("4-gen")).unwrap();
    let e: f64 = 1e9;
    let expected = 7000.0 * e.powf(-2.66) * (-e / 120e3).exp()
        + 150.0 * e.powf(-2.4) * (-e / 4e6).exp()
        + 12.0 * e.powf(-2.4) * (-e / 1.5e9).exp()
        + 1.2 * e.powf(-2.4) * (-e / 40e9).exp();
    let flux = model.nucleus_flux(NucleusId::PROTON, e).unwrap();
    assert!((flux - expected).abs() <= 1e-13 * expected);
}

#[test]
fn gaisser_honda_proton_at_100() {
    let model = PrimaryFlux::from_name("GaisserHonda", None).unwrap();
    let expected = 14900.0 * (100.0 + 2.15 * (-0.21 * 100f64.sqrt()).exp()).powf(-2.74);
    let flux = model.nucleus_flux(NucleusId::PROTON, 100.0).unwrap();
    assert!((flux - expected).abs() <= 1e-14 * expected);
}

#[test]
fn thunman_branch_selection() {
    let model = PrimaryFlux::from_name("Thunman", None).unwrap();
    let e = array![4.999e6, 5e6, 1e8];
    let flux = model.nucleus_flux_array(NucleusId::PROTON, &e).unwrap();
    assert_eq!(flux[0], 1.7e4 * 4.999e6f64.powf(-2.7));
    assert_eq!(flux[1], 1.74e6 * 5e6f64.powf(-3.0));
    assert_eq!(flux[2], 1.74e6 * 1e8f64.powf(-3.0));

    let helium = model.nucleus_flux_array(NucleusId::HELIUM, &e).unwrap();
    assert!(helium.iter().all(|&v| v == 0.0));
}

#[test]
fn nearby_nucleus_substitution() {
    let model = PrimaryFlux::from_name("HillasGaisser2012", Some("H3a")).unwrap();
    // N-14 → CNO group (C-12); Fe-56 → Fe-54.
    assert_eq!(
        model.nucleus_flux(NucleusId::NITROGEN, 1e4).unwrap(),
        model.nucleus_flux(NucleusId::CARBON, 1e4).unwrap()
    );
    assert_eq!(
        model.nucleus_flux(NucleusId::new(5626), 1e4).unwrap(),
        model.nucleus_flux(NucleusId::IRON, 1e4).unwrap()
    );
    // U-238 is nowhere near a parametrised group.
    let err = model.nucleus_flux(NucleusId::new(23892), 1e4).unwrap_err();
    assert!(matches!(
        err,
        FluxError::NoSimilarNucleus {
            requested_a: 238,
            closest_a: 54,
            max_delta_a: 3
        }
    ));
}

#[test]
fn scalar_and_array_queries_agree() {
    let model = PrimaryFlux::from_name("ZatsepinSokolskaya", Some("pamela")).unwrap();
    let e = array![[10.0, 500.0], [299.0, 3e4]];
    let total = model.total_flux(&e).unwrap();
    for ((i, j), &ei) in e.indexed_iter() {
        let scalar = model.total_flux(&arr0(ei)).unwrap()[()];
        assert!((total[[i, j]] - scalar).abs() <= 1e-14 * scalar);
    }
}

#[test]
fn delta_0_positive_for_proton_rich_models() {
    let e = array![10.0, 1e3, 1e5];
    for (family, option) in [
        ("HillasGaisser2012", Some("H3a")),
        ("GaisserHonda", None),
        ("PolyGonato", None),
    ] {
        let model = PrimaryFlux::from_name(family, option).unwrap();
        let d0 = model.delta_0(&e).unwrap();
        for &v in d0.iter() {
            assert!(v > 0.0 && v < 1.0, "{family}: delta_0 = {v}");
        }
    }
    // Thunman carries only protons.
    let thunman = PrimaryFlux::from_name("Thunman", None).unwrap();
    assert!(thunman.delta_0(&e).unwrap().iter().all(|&v| v == 1.0));
}

#[test]
fn spectral_index_of_pure_power_law() {
    let model = PrimaryFlux::from_name("SimplePowerlaw27", None).unwrap();
    let e = array![1e2, 1e6, 1e10];
    let gamma = model.nucleon_gamma(&e, 0.01).unwrap();
    for &g in gamma.iter() {
        assert!((g + 2.7).abs() < 1e-10);
    }
}

#[test]
fn config_file_selects_model() {
    let dir = scratch_dir("config");
    let path = dir.join("model.json");
    std::fs::write(
        &path,
        serde_json::json!({ "model": "CombinedGHandHG", "variant": "H4a" }).to_string(),
    )
    .unwrap();

    let cfg = ModelConfig::from_file(path.to_str().unwrap()).unwrap();
    let model = PrimaryFlux::from_config(&cfg).unwrap();
    assert_eq!(model.name(), "comb. GH and H4a");
    assert_eq!(model.nucleus_ids().len(), 5);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn spline_table_reproduces_source_model() {
    let source = PrimaryFlux::from_name("HillasGaisser2012", Some("H3a")).unwrap();
    let table = NucleonSplineTable::tabulate(&source, 1.0, 1e11, 400).unwrap();

    let dir = scratch_dir("spline");
    table
        .write_npz(&dir.join(spline_file_name(20170101)))
        .unwrap();
    table
        .write_npz(&dir.join(spline_file_name(20230515)))
        .unwrap();

    let cfg = ModelConfig::GlobalSplineFitBeta {
        spline_path: crflux_models::spline_table::latest_spline_file(&dir).unwrap(),
    };
    let beta = PrimaryFlux::from_config(&cfg).unwrap();
    assert_eq!(beta.short_name(), "GSF");

    // Interior knots only; the end points can round outside the range.
    let knots = &table.knots()[1..table.knots().len() - 1];
    let e = Array1::from(knots.iter().map(|k| k.exp()).collect::<Vec<_>>());
    let expected = source.p_and_n_flux(&e).unwrap();
    let pn = beta.p_and_n_flux(&e).unwrap();
    let nucleon = beta.tot_nucleon_flux(&e).unwrap();
    for i in 0..e.len() {
        assert!((pn.proton[i] / expected.proton[i] - 1.0).abs() < 1e-8);
        assert!((pn.neutron[i] / expected.neutron[i] - 1.0).abs() < 1e-8);
        assert!((pn.proton_fraction[i] - expected.proton_fraction[i]).abs() < 1e-8);
        assert!((nucleon[i] / (expected.proton[i] + expected.neutron[i]) - 1.0).abs() < 1e-8);
    }
    let _ = std::fs::remove_dir_all(&dir);
}
