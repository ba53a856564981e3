use nalgebra::{Rotation3, Unit, Vector3};

use crate::{constants::Radian, orbital_plane::OrbitalPlanePoint};

/// Orientation of an orbital plane within the reference frame.
///
/// The three Euler angles, in radians:
/// * `periapsis_argument` (ω) – rotation about the orbit normal,
/// * `inclination` (i) – rotation about the line of nodes,
/// * `ascending_node_longitude` (Ω) – rotation about the reference-frame pole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitOrientation {
    pub periapsis_argument: Radian,
    pub inclination: Radian,
    pub ascending_node_longitude: Radian,
}

/// Elementary rotation of angle `alpha` about one of the frame axes.
///
/// The rotation is **applied to the vector** in a fixed frame (active rotation,
/// right-handed): `rotation_about(Vector3::z_axis(), θ) · x̂ = (cos θ, sin θ, 0)`.
pub fn rotation_about(axis: Unit<Vector3<f64>>, alpha: Radian) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&axis, alpha)
}

/// Rotate an in-plane position into the shared reference frame.
///
/// The point `(x_orb, y_orb, 0)` is rotated successively:
/// 1. by ω about Z (orbit normal),
/// 2. by i about X (line of nodes), which introduces `z = y'·sin(i)`,
/// 3. by Ω about Z (reference pole).
///
/// Closed form:
///
/// ```text
/// x' = x_orb·cos ω − y_orb·sin ω
/// y' = x_orb·sin ω + y_orb·cos ω
/// x  = x'·cos Ω − y'·cos i·sin Ω
/// y  = x'·sin Ω + y'·cos i·cos Ω
/// z  = y'·sin i
/// ```
///
/// The rotations are applied one after the other rather than as a precomposed matrix, so
/// `i = 0` gives `z = 0.0` exactly.
///
/// Arguments
/// -----------------
/// * `point`: in-plane position (AU).
/// * `orientation`: the Euler angles of the orbital plane.
///
/// Return
/// ----------
/// * The position vector in the reference frame (AU).
pub fn to_reference_frame(
    point: &OrbitalPlanePoint,
    orientation: &OrbitOrientation,
) -> Vector3<f64> {
    let in_plane = Vector3::new(point.x, point.y, 0.0);

    let along_nodes = rotation_about(Vector3::z_axis(), orientation.periapsis_argument) * in_plane;
    let tilted = rotation_about(Vector3::x_axis(), orientation.inclination) * along_nodes;
    rotation_about(Vector3::z_axis(), orientation.ascending_node_longitude) * tilted
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn point(x: f64, y: f64) -> OrbitalPlanePoint {
        OrbitalPlanePoint {
            radius: x.hypot(y),
            true_anomaly: y.atan2(x),
            x,
            y,
        }
    }

    /// Closed-form composition used as reference.
    fn closed_form(x_orb: f64, y_orb: f64, o: &OrbitOrientation) -> (f64, f64, f64) {
        let (sw, cw) = o.periapsis_argument.sin_cos();
        let (si, ci) = o.inclination.sin_cos();
        let (sn, cn) = o.ascending_node_longitude.sin_cos();

        let x_p = x_orb * cw - y_orb * sw;
        let y_p = x_orb * sw + y_orb * cw;
        let (x_ecl, y_ecl, z_ecl) = (x_p, y_p * ci, y_p * si);
        (x_ecl * cn - y_ecl * sn, x_ecl * sn + y_ecl * cn, z_ecl)
    }

    #[test]
    fn test_elementary_rotation_is_active() {
        let r = rotation_about(Vector3::z_axis(), FRAC_PI_2) * Vector3::x();
        assert_abs_diff_eq!(r, Vector3::y(), epsilon = 1e-15);

        let r = rotation_about(Vector3::x_axis(), FRAC_PI_2) * Vector3::y();
        assert_abs_diff_eq!(r, Vector3::z(), epsilon = 1e-15);
    }

    #[test]
    fn test_matches_closed_form() {
        let orientation = OrbitOrientation {
            periapsis_argument: 1.2451951388,
            inclination: 0.2026738329,
            ascending_node_longitude: 0.0079559790,
        };

        for &(x, y) in &[(1.0, 0.0), (0.3, -1.2), (-2.5, 0.7)] {
            let v = to_reference_frame(&point(x, y), &orientation);
            let (ex, ey, ez) = closed_form(x, y, &orientation);
            assert_abs_diff_eq!(v.x, ex, epsilon = 1e-14);
            assert_abs_diff_eq!(v.y, ey, epsilon = 1e-14);
            assert_abs_diff_eq!(v.z, ez, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_planar_orbit_has_zero_z() {
        let orientation = OrbitOrientation {
            periapsis_argument: 1.7966,
            inclination: 0.0,
            ascending_node_longitude: 0.83,
        };
        for &(x, y) in &[(0.98, 0.1), (-0.2, -1.01), (5.0, 3.0)] {
            let v = to_reference_frame(&point(x, y), &orientation);
            assert_eq!(v.z, 0.0);
        }
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let orientation = OrbitOrientation {
            periapsis_argument: 2.234,
            inclination: 3.056,
            ascending_node_longitude: 5.622,
        };
        let p = point(-0.7, 1.9);
        let v = to_reference_frame(&p, &orientation);
        assert_abs_diff_eq!(v.norm(), p.radius, epsilon = 1e-14);
    }
}
