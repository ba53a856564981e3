use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use orrery::{
    catalog::{BodyCatalog, BodyId},
    kepler::SolverParams,
    orrery::Orrery,
    orrery_errors::OrreryError,
    propagator::try_compute_position,
};

mod common;
use common::{assert_position_close, atlas, earth, mars, ATLAS_PERIHELION};

#[test]
fn test_load_catalog_from_file() {
    let orrery = Orrery::from_json_file("tests/data/bodies.json").unwrap();
    let catalog = orrery.catalog();
    assert_eq!(catalog.len(), 3);

    let names: Vec<String> = catalog.iter().map(|e| e.id.to_string()).collect();
    assert_eq!(names, ["earth", "mars", "3I/ATLAS"]);

    assert_eq!(catalog.elements_of(&"Earth".into()), Ok(&earth()));
    assert_eq!(catalog.elements_of(&"MARS".into()), Ok(&mars()));
    assert_eq!(catalog.elements_of(&"3i/atlas".into()), Ok(&atlas()));

    let comet = catalog.get(&"3I/ATLAS".into()).unwrap();
    assert_eq!(comet.display_name(), "3I/ATLAS");
    assert_eq!(comet.metadata.notes.as_deref(), Some("interstellar comet"));
}

#[test]
fn test_mixed_record_is_rejected() {
    let err = Orrery::from_json_file("tests/data/mixed_record.json").unwrap_err();
    assert_eq!(
        err,
        OrreryError::InvalidElements("record 'chimera' mixes elliptical and hyperbolic fields".into())
    );
}

#[test]
fn test_builtin_matches_file_catalog() {
    let builtin = Orrery::builtin();
    let from_file = Orrery::from_json_file("tests/data/bodies.json").unwrap();
    let instant = Epoch::from_gregorian_utc_at_midnight(2025, 12, 19);

    for name in ["earth", "mars", "3I/ATLAS"] {
        let id = BodyId::from(name);
        assert_position_close(
            &builtin.position_of(&id, &instant).unwrap(),
            &from_file.position_of(&id, &instant).unwrap(),
            1e-12,
        );
    }
}

#[test]
fn test_positions_follow_free_functions() {
    let orrery = Orrery::builtin();
    let instant = Epoch::from_gregorian_utc_at_noon(2024, 3, 20);

    for (entry, body) in orrery.catalog().iter().zip(orrery.positions_at(&instant)) {
        assert_eq!(entry.id, body.id);
        assert!(body.available);
        assert_eq!(
            body.position,
            try_compute_position(&entry.elements, &instant).unwrap()
        );
    }
}

#[test]
fn test_comet_earth_distance() {
    let orrery = Orrery::builtin();
    let instant = Epoch::from_gregorian_utc_at_midnight(2025, 12, 19);

    let d = orrery
        .distance_between(&"3I/ATLAS".into(), &"earth".into(), &instant)
        .unwrap();
    let comet = orrery.position_of(&"3I/ATLAS".into(), &instant).unwrap();
    let earth = orrery.position_of(&"earth".into(), &instant).unwrap();

    assert_abs_diff_eq!(d, comet.distance_to(&earth), epsilon = 1e-12);
    // triangle inequality with the Sun
    assert!(d <= comet.norm() + earth.norm());
    assert!(d >= (comet.norm() - earth.norm()).abs());
}

#[test]
fn test_comet_trail() {
    let orrery = Orrery::builtin();
    let trail = orrery
        .trail(
            &"3I/ATLAS".into(),
            ATLAS_PERIHELION - 180.0,
            ATLAS_PERIHELION + 365.0,
            2.0,
        )
        .unwrap();

    assert_eq!(trail.len(), 273);
    assert_eq!(trail[0].day, ATLAS_PERIHELION - 180.0);
    let closest = trail
        .iter()
        .map(|s| s.position.norm())
        .fold(f64::INFINITY, f64::min);
    assert_abs_diff_eq!(closest, 1.356419, epsilon = 1e-2);

    assert!(matches!(
        orrery.trail(&"3I/ATLAS".into(), ATLAS_PERIHELION, ATLAS_PERIHELION, -2.0),
        Err(OrreryError::InvalidSamplingGrid(_))
    ));
}

#[test]
fn test_solver_params_propagate_to_facade() {
    let params = SolverParams::builder()
        .elliptic_iterations(1)
        .build()
        .unwrap();
    let coarse = Orrery::builtin().with_solver_params(params);
    let fine = Orrery::builtin();
    let instant = Epoch::from_gregorian_utc_at_noon(2000, 1, 1);
    let id = BodyId::from("mercury");

    let coarse_pos = coarse.position_of(&id, &instant).unwrap();
    let fine_pos = fine.position_of(&id, &instant).unwrap();
    assert!(coarse_pos.distance_to(&fine_pos) > 1e-6);
}

#[test]
fn test_catalog_export_reloads() {
    let json = BodyCatalog::builtin().to_json_string().unwrap();
    let reloaded = BodyCatalog::from_json_str(&json).unwrap();
    assert_eq!(reloaded.len(), 9);
    assert_eq!(
        reloaded.get(&"neptune".into()).unwrap(),
        BodyCatalog::builtin().get(&"neptune".into()).unwrap()
    );
}
