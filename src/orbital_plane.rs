use crate::{
    constants::{AstronomicalUnit, Radian},
    orrery_errors::OrreryError,
};

/// Position of a body within its own orbital plane.
///
/// The in-plane frame has its origin at the focus (central body), the X axis toward
/// periapsis and the Y axis 90° ahead in the direction of motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalPlanePoint {
    /// Distance to the focus (AU).
    pub radius: AstronomicalUnit,
    /// Angle from periapsis as seen from the focus (radians).
    pub true_anomaly: Radian,
    /// `r·cos(ν)` (AU).
    pub x: AstronomicalUnit,
    /// `r·sin(ν)` (AU).
    pub y: AstronomicalUnit,
}

impl OrbitalPlanePoint {
    fn from_polar(
        radius: AstronomicalUnit,
        true_anomaly: Radian,
        stage: &'static str,
    ) -> Result<Self, OrreryError> {
        let (sin_nu, cos_nu) = true_anomaly.sin_cos();
        let point = OrbitalPlanePoint {
            radius,
            true_anomaly,
            x: radius * cos_nu,
            y: radius * sin_nu,
        };

        if [point.radius, point.true_anomaly, point.x, point.y]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(point)
        } else {
            Err(OrreryError::NonFinite(stage))
        }
    }
}

/// Resolve the in-plane position on an ellipse from the eccentric anomaly.
///
/// * `r = a·(1 − e·cos E)`
/// * `ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2))`
///
/// Arguments
/// -----------------
/// * `semi_major_axis`: `a > 0` (AU).
/// * `eccentricity`: `e` in `[0, 1)`.
/// * `eccentric_anomaly`: `E` (radians).
///
/// Return
/// ----------
/// * The in-plane point, or [`OrreryError::NonFinite`] if a component is NaN/∞.
pub fn resolve_elliptic(
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
    eccentric_anomaly: Radian,
) -> Result<OrbitalPlanePoint, OrreryError> {
    let radius = semi_major_axis * (1.0 - eccentricity * eccentric_anomaly.cos());
    let (sin_half, cos_half) = (eccentric_anomaly / 2.0).sin_cos();
    let true_anomaly = 2.0
        * f64::atan2(
            (1.0 + eccentricity).sqrt() * sin_half,
            (1.0 - eccentricity).sqrt() * cos_half,
        );

    OrbitalPlanePoint::from_polar(radius, true_anomaly, "elliptic orbital-plane resolver")
}

/// Resolve the in-plane position on a hyperbola from the hyperbolic anomaly.
///
/// * `r = |a|·(e·cosh H − 1)`
/// * `ν = 2·atan(√((e+1)/(e−1))·tanh(H/2))`
///
/// Arguments
/// -----------------
/// * `semi_major_axis_magnitude`: `|a| = q / (e − 1)` (AU).
/// * `eccentricity`: `e > 1`.
/// * `hyperbolic_anomaly`: `H` (radians).
///
/// Return
/// ----------
/// * The in-plane point, or [`OrreryError::NonFinite`] if a component is NaN/∞.
pub fn resolve_hyperbolic(
    semi_major_axis_magnitude: AstronomicalUnit,
    eccentricity: f64,
    hyperbolic_anomaly: Radian,
) -> Result<OrbitalPlanePoint, OrreryError> {
    let radius = semi_major_axis_magnitude * (eccentricity * hyperbolic_anomaly.cosh() - 1.0);
    let true_anomaly = 2.0
        * (((eccentricity + 1.0) / (eccentricity - 1.0)).sqrt() * (hyperbolic_anomaly / 2.0).tanh())
            .atan();

    OrbitalPlanePoint::from_polar(radius, true_anomaly, "hyperbolic orbital-plane resolver")
}
