#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use orrery::orbit_type::{
    cometary_element::CometaryElements, keplerian_element::KeplerianElements, OrbitalElementSet,
};
use orrery::propagator::PositionVector;

pub const ATLAS_PERIHELION: f64 = 2460977.981439;

pub fn assert_position_close(actual: &PositionVector, expected: &PositionVector, epsilon: f64) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = epsilon);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = epsilon);
}

pub fn elliptic(
    e: f64,
    i: f64,
    omega: f64,
    node: f64,
    a: f64,
    m0: f64,
    period: f64,
) -> OrbitalElementSet {
    OrbitalElementSet::elliptic(
        e,
        i,
        omega,
        node,
        KeplerianElements {
            semi_major_axis: a,
            mean_anomaly_at_epoch: m0,
            reference_epoch: 2451545.0,
            orbital_period: period,
        },
    )
}

pub fn earth() -> OrbitalElementSet {
    elliptic(0.0167, 0.0, 102.94719, 0.0, 1.0, 357.529, 365.25)
}

pub fn mars() -> OrbitalElementSet {
    elliptic(0.0934, 1.9, 286.496, 49.558, 1.524, 18.602, 686.98)
}

pub fn mercury() -> OrbitalElementSet {
    elliptic(0.2056, 7.0, 29.124, 48.331, 0.387, 174.794, 87.97)
}

pub fn hyperbola(e: f64, q: f64, tp: f64) -> OrbitalElementSet {
    OrbitalElementSet::hyperbolic(
        e,
        175.113,
        128.010,
        322.157,
        CometaryElements {
            perihelion_distance: q,
            perihelion_time: tp,
        },
    )
}

pub fn atlas() -> OrbitalElementSet {
    hyperbola(6.139587, 1.356419, ATLAS_PERIHELION)
}
