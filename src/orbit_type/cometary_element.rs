use std::{cmp::Ordering::Greater, fmt};

use crate::{
    constants::{AstronomicalUnit, JulianDay, Radian, GAUSS_GRAV},
    orrery_errors::OrreryError,
};

/// # Cometary (perihelion-based) motion parameters
///
/// Perihelion-based parameters describe **hyperbolic** trajectories (`e > 1`), where the
/// semi-major axis is negative in the classical convention and a period does not exist.
///
/// Units & conventions
/// --------------------
/// - Distances in **AU**; epochs in **Julian Day**.
/// - The semi-major axis magnitude is derived, `|a| = q / (e − 1)`.
/// - The mean motion uses the Gaussian gravitational constant for the Sun,
///   `n = k / |a|^1.5`, and the mean anomaly is measured from perihelion passage,
///   `M(t) = n·(t − T)`.
///
/// See also
/// ------------
/// * [`KeplerianElements`](crate::orbit_type::keplerian_element::KeplerianElements) – Elliptical counterpart.
/// * [`solve_hyperbolic_anomaly`](crate::kepler::solve_hyperbolic_anomaly) – Consumer of `M(t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometaryElements {
    /// Perihelion distance `q` (AU).
    pub perihelion_distance: AstronomicalUnit,

    /// Time of perihelion passage `T` (Julian Day).
    pub perihelion_time: JulianDay,
}

impl CometaryElements {
    /// Semi-major axis magnitude `|a| = q / (e − 1)` (always positive for `e > 1`, `q > 0`).
    pub fn semi_major_axis_magnitude(&self, eccentricity: f64) -> AstronomicalUnit {
        self.perihelion_distance / (eccentricity - 1.0)
    }

    /// Hyperbolic mean motion `n = k / |a|^1.5` (radians per day).
    pub fn mean_motion(&self, eccentricity: f64) -> f64 {
        GAUSS_GRAV / self.semi_major_axis_magnitude(eccentricity).powf(1.5)
    }

    /// Hyperbolic mean anomaly `M(t) = n·(t − T)` (radians).
    ///
    /// Arguments
    /// -----------------
    /// * `eccentricity` – Eccentricity of the trajectory (> 1).
    /// * `day` – Julian Day of evaluation.
    ///
    /// Return
    /// ----------
    /// * The mean anomaly, negative before perihelion and positive after.
    pub fn mean_anomaly_at(&self, eccentricity: f64, day: JulianDay) -> Radian {
        self.mean_motion(eccentricity) * (day - self.perihelion_time)
    }

    /// Check the branch constraints: finite fields, `e > 1`, `q > 0`.
    ///
    /// A parabola (`e = 1`) has no finite `|a|` and is rejected.
    pub(crate) fn validate(&self, eccentricity: f64) -> Result<(), OrreryError> {
        if !self.perihelion_distance.is_finite() || !self.perihelion_time.is_finite() {
            return Err(OrreryError::InvalidElements(
                "cometary elements must be finite".into(),
            ));
        }
        if eccentricity.partial_cmp(&1.0) != Some(Greater) {
            return Err(OrreryError::InvalidElements(format!(
                "hyperbolic branch requires e > 1 (got {eccentricity})"
            )));
        }
        if self.perihelion_distance <= 0.0 {
            return Err(OrreryError::InvalidElements(format!(
                "perihelion distance must be > 0 (got {})",
                self.perihelion_distance
            )));
        }
        Ok(())
    }
}

impl fmt::Display for CometaryElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  q   (perihelion distance)   = {:.6} AU",
            self.perihelion_distance
        )?;
        write!(
            f,
            "  T   (perihelion passage)    = JD {:.6}",
            self.perihelion_time
        )
    }
}
