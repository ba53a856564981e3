//! # Orbital element sets
//!
//! This module defines [`OrbitalElementSet`](crate::orbit_type::OrbitalElementSet), the immutable
//! description of one body's trajectory consumed by the propagator.
//!
//! An element set is made of:
//!
//! - the **shape** of the conic, its eccentricity `e`;
//! - the **orientation** of the orbital plane, three Euler angles `(i, ω, Ω)` in degrees;
//! - the **branch-specific motion parameters**, held by the [`OrbitalElements`] sum type:
//!   - [`keplerian_element`](crate::orbit_type::keplerian_element): `(a, M₀, t₀, P)` for `0 ≤ e < 1`;
//!   - [`cometary_element`](crate::orbit_type::cometary_element): `(q, T)` for `e > 1`.
//!
//! Holding the motion parameters in a sum type makes a set mixing both parameterizations
//! unrepresentable. The remaining constraints (eccentricity consistent with the branch,
//! positive distances and period, finite values) are checked by
//! [`OrbitalElementSet::validate`] before every propagation.
//!
//! ## Typical workflow
//!
//! ```rust
//! use orrery::orbit_type::{keplerian_element::KeplerianElements, OrbitalElementSet};
//!
//! let earth = OrbitalElementSet::elliptic(
//!     0.0167,
//!     0.0,
//!     102.94719,
//!     0.0,
//!     KeplerianElements {
//!         semi_major_axis: 1.0,
//!         mean_anomaly_at_epoch: 357.529,
//!         reference_epoch: 2451545.0,
//!         orbital_period: 365.25,
//!     },
//! );
//! assert!(earth.validate().is_ok());
//! ```
use std::fmt;

use crate::{
    constants::{AstronomicalUnit, Degree, JulianDay, Radian, RADEG},
    orbit_type::{cometary_element::CometaryElements, keplerian_element::KeplerianElements},
    orrery_errors::OrreryError,
};

/// Elliptical motion parameters and related helpers.
pub mod keplerian_element;

/// Hyperbolic (perihelion-based) motion parameters and related helpers.
pub mod cometary_element;

/// Branch-specific motion parameters.
///
/// Variants
/// --------
/// * `Keplerian`: `(a, M₀, t₀, P)`; selects the elliptical solver.
/// * `Cometary`: `(q, T)`; selects the hyperbolic solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitalElements {
    Keplerian(KeplerianElements),
    Cometary(CometaryElements),
}

impl OrbitalElements {
    /// Get a reference to the underlying [`KeplerianElements`] if this is `Keplerian`.
    pub fn as_keplerian(&self) -> Option<&KeplerianElements> {
        if let OrbitalElements::Keplerian(ref k) = self {
            Some(k)
        } else {
            None
        }
    }

    /// Get a reference to the underlying [`CometaryElements`] if this is `Cometary`.
    pub fn as_cometary(&self) -> Option<&CometaryElements> {
        if let OrbitalElements::Cometary(ref c) = self {
            Some(c)
        } else {
            None
        }
    }
}

/// Immutable description of one body's trajectory around the central body.
///
/// Units
/// -----
/// * `eccentricity`: unitless.
/// * `inclination`, `periapsis_argument`, `ascending_node_longitude`: **degrees**
///   (converted to radians by the accessors ending in `_rad`).
///
/// See also
/// --------
/// * [`OrbitalElementSet::validate`] – Branch consistency checks.
/// * [`crate::propagator::try_compute_position`] – Main consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElementSet {
    pub eccentricity: f64,
    pub inclination: Degree,
    pub periapsis_argument: Degree,
    pub ascending_node_longitude: Degree,
    pub motion: OrbitalElements,
}

impl OrbitalElementSet {
    /// Build an elliptical element set.
    ///
    /// Arguments
    /// -----------------
    /// * `eccentricity`: `e` (expected in `[0, 1)`).
    /// * `inclination`: `i` in degrees.
    /// * `periapsis_argument`: `ω` in degrees.
    /// * `ascending_node_longitude`: `Ω` in degrees.
    /// * `motion`: the elliptical motion parameters.
    ///
    /// Return
    /// ----------
    /// * The element set; no validation is performed here, see [`OrbitalElementSet::validate`].
    pub fn elliptic(
        eccentricity: f64,
        inclination: Degree,
        periapsis_argument: Degree,
        ascending_node_longitude: Degree,
        motion: KeplerianElements,
    ) -> Self {
        Self {
            eccentricity,
            inclination,
            periapsis_argument,
            ascending_node_longitude,
            motion: OrbitalElements::Keplerian(motion),
        }
    }

    /// Build a hyperbolic element set, see [`OrbitalElementSet::elliptic`] for the angles.
    pub fn hyperbolic(
        eccentricity: f64,
        inclination: Degree,
        periapsis_argument: Degree,
        ascending_node_longitude: Degree,
        motion: CometaryElements,
    ) -> Self {
        Self {
            eccentricity,
            inclination,
            periapsis_argument,
            ascending_node_longitude,
            motion: OrbitalElements::Cometary(motion),
        }
    }

    pub fn is_hyperbolic(&self) -> bool {
        matches!(self.motion, OrbitalElements::Cometary(_))
    }

    pub fn inclination_rad(&self) -> Radian {
        self.inclination * RADEG
    }

    pub fn periapsis_argument_rad(&self) -> Radian {
        self.periapsis_argument * RADEG
    }

    pub fn ascending_node_longitude_rad(&self) -> Radian {
        self.ascending_node_longitude * RADEG
    }

    /// Check that the set is usable by the propagator.
    ///
    /// Rules
    /// -----
    /// * All fields finite, `e ≥ 0`.
    /// * Elliptical branch: `e < 1`, `a > 0`, `P > 0`.
    /// * Hyperbolic branch: `e > 1`, `q > 0`.
    ///
    /// Errors
    /// ------
    /// Returns [`OrreryError::InvalidElements`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), OrreryError> {
        let angles = [
            self.eccentricity,
            self.inclination,
            self.periapsis_argument,
            self.ascending_node_longitude,
        ];
        if angles.iter().any(|v| !v.is_finite()) {
            return Err(OrreryError::InvalidElements(
                "eccentricity and orientation angles must be finite".into(),
            ));
        }
        if self.eccentricity < 0.0 {
            return Err(OrreryError::InvalidElements(format!(
                "eccentricity must be >= 0 (got {})",
                self.eccentricity
            )));
        }

        match &self.motion {
            OrbitalElements::Keplerian(ke) => ke.validate(self.eccentricity),
            OrbitalElements::Cometary(ce) => ce.validate(self.eccentricity),
        }
    }

    /// Semi-major axis in the classical sign convention.
    ///
    /// * Elliptical: `a > 0` as stored.
    /// * Hyperbolic: `a = −q / (e − 1) < 0`.
    pub fn semi_major_axis(&self) -> AstronomicalUnit {
        match &self.motion {
            OrbitalElements::Keplerian(ke) => ke.semi_major_axis,
            OrbitalElements::Cometary(ce) => -ce.semi_major_axis_magnitude(self.eccentricity),
        }
    }

    /// Mean motion (radians per day) of the selected branch.
    pub fn mean_motion(&self) -> f64 {
        match &self.motion {
            OrbitalElements::Keplerian(ke) => ke.mean_motion(),
            OrbitalElements::Cometary(ce) => ce.mean_motion(self.eccentricity),
        }
    }

    /// Mean anomaly (radians) of the selected branch at `day`.
    pub fn mean_anomaly_at(&self, day: JulianDay) -> Radian {
        match &self.motion {
            OrbitalElements::Keplerian(ke) => ke.mean_anomaly_at(day),
            OrbitalElements::Cometary(ce) => ce.mean_anomaly_at(self.eccentricity, day),
        }
    }
}

impl fmt::Display for OrbitalElementSet {
    /// Pretty-print the element set with both degrees and radians for angles.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.motion {
            OrbitalElements::Keplerian(_) => writeln!(f, "[Elliptical orbit]")?,
            OrbitalElements::Cometary(_) => writeln!(f, "[Hyperbolic trajectory]")?,
        }
        writeln!(f, "-------------------------------------------")?;
        writeln!(
            f,
            "  e   (eccentricity)          = {:.6}",
            self.eccentricity
        )?;
        writeln!(
            f,
            "  i   (inclination)           = {:.6} rad ({:.6}°)",
            self.inclination_rad(),
            self.inclination
        )?;
        writeln!(
            f,
            "  Ω   (longitude of node)     = {:.6} rad ({:.6}°)",
            self.ascending_node_longitude_rad(),
            self.ascending_node_longitude
        )?;
        writeln!(
            f,
            "  ω   (argument of periapsis) = {:.6} rad ({:.6}°)",
            self.periapsis_argument_rad(),
            self.periapsis_argument
        )?;
        match &self.motion {
            OrbitalElements::Keplerian(ke) => write!(f, "{ke}"),
            OrbitalElements::Cometary(ce) => write!(f, "{ce}"),
        }
    }
}
