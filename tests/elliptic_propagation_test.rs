use approx::assert_abs_diff_eq;
use hifitime::Epoch;
use orrery::propagator::{try_compute_position, try_compute_position_at_day};

mod common;
use common::{assert_position_close, earth, elliptic, mars, mercury};

#[test]
fn test_earth_at_j2000() {
    let instant = Epoch::from_gregorian_utc_at_noon(2000, 1, 1);
    let pos = try_compute_position(&earth(), &instant).unwrap();

    // near perihelion in early January
    assert_abs_diff_eq!(pos.norm(), 0.9833, epsilon = 1e-3);
    assert_eq!(pos.z, 0.0);
}

#[test]
fn test_position_repeats_after_one_period() {
    for elements in [earth(), mars(), mercury()] {
        let period = elements.motion.as_keplerian().unwrap().orbital_period;
        for &day in &[2451545.0, 2455000.25, 2460977.5] {
            let now = try_compute_position_at_day(&elements, day).unwrap();
            let later = try_compute_position_at_day(&elements, day + period).unwrap();
            assert_position_close(&now, &later, 1e-9);
        }
    }
}

#[test]
fn test_planar_orbit_stays_in_reference_plane() {
    let planar = elliptic(0.2, 0.0, 75.0, 140.0, 2.3, 12.0, 1274.0);
    for k in 0..40 {
        let pos = try_compute_position_at_day(&planar, 2451545.0 + 37.3 * k as f64).unwrap();
        assert_eq!(pos.z, 0.0);
    }
}

#[test]
fn test_circular_orbit_has_constant_radius() {
    let circular = elliptic(0.0, 23.0, 40.0, 110.0, 5.2, 90.0, 4332.59);
    for k in 0..40 {
        let pos = try_compute_position_at_day(&circular, 2451545.0 + 111.0 * k as f64).unwrap();
        assert_abs_diff_eq!(pos.norm(), 5.2, epsilon = 1e-12);
    }
}

#[test]
fn test_radius_stays_between_apsides() {
    for elements in [earth(), mars(), mercury()] {
        let ke = *elements.motion.as_keplerian().unwrap();
        let e = elements.eccentricity;
        let (r_min, r_max) = (
            ke.semi_major_axis * (1.0 - e),
            ke.semi_major_axis * (1.0 + e),
        );

        for k in 0..100 {
            let day = 2451545.0 + ke.orbital_period * k as f64 / 37.0;
            let r = try_compute_position_at_day(&elements, day).unwrap().norm();
            assert!(r >= r_min - 1e-12 && r <= r_max + 1e-12, "r = {r}");
        }
    }
}

#[test]
fn test_long_span_without_range_reduction() {
    // two thousand Mercury years after the epoch
    let elements = mercury();
    let start = try_compute_position_at_day(&elements, 2451545.0).unwrap();
    let far = try_compute_position_at_day(&elements, 2451545.0 + 2000.0 * 87.97).unwrap();
    assert_position_close(&start, &far, 1e-8);
}
