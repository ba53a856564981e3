//! # Keplerian (elliptical) motion parameters
//!
//! This module defines [`KeplerianElements`](crate::orbit_type::keplerian_element::KeplerianElements),
//! the branch-specific part of an [`OrbitalElementSet`](crate::orbit_type::OrbitalElementSet) for
//! **bound orbits** (`0 ≤ e < 1`).
//!
//! ## Parameters
//!
//! 1. **a** – Semi-major axis (AU)
//! 2. **M₀** – Mean anomaly at the reference epoch (degrees)
//! 3. **t₀** – Reference epoch (Julian Day)
//! 4. **P** – Orbital period (days)
//!
//! The mean motion is derived from the period, `n = 2π / P`, and the mean anomaly at a day `t`
//! is `M(t) = M₀ + n·(t − t₀)`. The mean anomaly is **not** reduced modulo 2π.
//!
//! ## See also
//!
//! - [`CometaryElements`](crate::orbit_type::cometary_element::CometaryElements) – hyperbolic counterpart.
//! - [`solve_elliptic_anomaly`](crate::kepler::solve_elliptic_anomaly) – consumer of `M(t)`.

use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Days, Degree, JulianDay, Radian, DPI, RADEG},
    orrery_errors::OrreryError,
};

/// Elliptical motion parameters.
///
/// Units
/// -----
/// * `semi_major_axis`: Astronomical Units (AU).
/// * `mean_anomaly_at_epoch`: degrees.
/// * `reference_epoch`: Julian Day.
/// * `orbital_period`: days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerianElements {
    pub semi_major_axis: AstronomicalUnit,
    pub mean_anomaly_at_epoch: Degree,
    pub reference_epoch: JulianDay,
    pub orbital_period: Days,
}

impl KeplerianElements {
    /// Mean motion `n = 2π / P` (radians per day).
    pub fn mean_motion(&self) -> f64 {
        DPI / self.orbital_period
    }

    /// Mean anomaly `M(t) = M₀ + n·(t − t₀)` in radians, without range reduction.
    ///
    /// Arguments
    /// ---------
    /// * `day` – Julian Day of evaluation.
    ///
    /// Return
    /// ------
    /// * The mean anomaly in radians; it grows without bound with `|t − t₀|`.
    pub fn mean_anomaly_at(&self, day: JulianDay) -> Radian {
        self.mean_anomaly_at_epoch * RADEG + self.mean_motion() * (day - self.reference_epoch)
    }

    /// Check the branch constraints: finite fields, `0 ≤ e < 1`, `a > 0`, `P > 0`.
    pub(crate) fn validate(&self, eccentricity: f64) -> Result<(), OrreryError> {
        let fields = [
            self.semi_major_axis,
            self.mean_anomaly_at_epoch,
            self.reference_epoch,
            self.orbital_period,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(OrreryError::InvalidElements(
                "elliptical elements must be finite".into(),
            ));
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(OrreryError::InvalidElements(format!(
                "elliptical branch requires 0 <= e < 1 (got {eccentricity})"
            )));
        }
        if self.semi_major_axis <= 0.0 {
            return Err(OrreryError::InvalidElements(format!(
                "semi-major axis must be > 0 (got {})",
                self.semi_major_axis
            )));
        }
        if self.orbital_period <= 0.0 {
            return Err(OrreryError::InvalidElements(format!(
                "orbital period must be > 0 (got {})",
                self.orbital_period
            )));
        }
        Ok(())
    }
}

impl fmt::Display for KeplerianElements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  a   (semi-major axis)       = {:.6} AU",
            self.semi_major_axis
        )?;
        writeln!(
            f,
            "  M0  (mean anomaly @ epoch)  = {:.6} rad ({:.6}°)",
            self.mean_anomaly_at_epoch * RADEG,
            self.mean_anomaly_at_epoch
        )?;
        writeln!(
            f,
            "  t0  (reference epoch)       = JD {:.6}",
            self.reference_epoch
        )?;
        write!(
            f,
            "  P   (orbital period)        = {:.6} d",
            self.orbital_period
        )
    }
}
