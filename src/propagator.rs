//! # Two-body position propagator
//!
//! Public entry point of the crate: given an [`OrbitalElementSet`] and an instant, return the
//! position of the body relative to the central body, in AU, in the shared reference frame
//! (ecliptic: X toward the reference direction, Z toward ecliptic north).
//!
//! ## Pipeline
//!
//! ```text
//! instant ──► to_continuous_day ──► mean anomaly M(t)
//!         ──► solve_elliptic_anomaly / solve_hyperbolic_anomaly
//!         ──► resolve_elliptic / resolve_hyperbolic   (r, ν, x_orb, y_orb)
//!         ──► to_reference_frame                      (ω, i, Ω)
//!         ──► PositionVector
//! ```
//!
//! Every stage is a pure function; the propagator holds no state, performs no I/O and is safe
//! to call concurrently from any number of threads.
//!
//! ## Failures
//!
//! Two flavours of every entry point are provided:
//!
//! - `try_*` functions return `Result<PositionVector, OrreryError>` so callers and tests can
//!   tell a genuine position from a failed computation;
//! - [`compute_position`] never fails: on error it emits a `log::warn!` diagnostic and returns
//!   [`PositionVector::UNAVAILABLE`], which renderers must treat as "nothing to draw this frame".
//!
//! ## See also
//!
//! - [`crate::kepler`] – anomaly solvers and [`SolverParams`].
//! - [`crate::orbital_plane`] – radius and true anomaly.
//! - [`crate::ref_system`] – rotation into the reference frame.

use hifitime::Epoch;
use log::{debug, warn};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{AstronomicalUnit, Days, JulianDay},
    kepler::{solve_elliptic_anomaly, solve_hyperbolic_anomaly, SolverParams},
    orbit_type::{OrbitalElementSet, OrbitalElements},
    orbital_plane::{resolve_elliptic, resolve_hyperbolic, OrbitalPlanePoint},
    orrery_errors::OrreryError,
    ref_system::{to_reference_frame, OrbitOrientation},
    time::to_continuous_day,
};

/// Heliocentric position in the shared reference frame (AU).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionVector {
    pub x: AstronomicalUnit,
    pub y: AstronomicalUnit,
    pub z: AstronomicalUnit,
}

impl PositionVector {
    /// Sentinel returned by [`compute_position`] when no valid position could be computed.
    pub const UNAVAILABLE: PositionVector = PositionVector {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: AstronomicalUnit, y: AstronomicalUnit, z: AstronomicalUnit) -> Self {
        Self { x, y, z }
    }

    /// `true` if this is the [`PositionVector::UNAVAILABLE`] sentinel.
    ///
    /// No body handled by this crate can sit exactly on the central body, so the origin never
    /// collides with a real position.
    pub fn is_unavailable(&self) -> bool {
        *self == Self::UNAVAILABLE
    }

    /// Distance to the central body (AU).
    pub fn norm(&self) -> AstronomicalUnit {
        self.as_vector3().norm()
    }

    /// Distance to another position (AU).
    pub fn distance_to(&self, other: &PositionVector) -> AstronomicalUnit {
        (self.as_vector3() - other.as_vector3()).norm()
    }

    pub fn as_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for PositionVector {
    fn from(v: Vector3<f64>) -> Self {
        PositionVector::new(v.x, v.y, v.z)
    }
}

/// One point of a sampled trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub day: JulianDay,
    pub position: PositionVector,
}

/// Solve the branch-specific anomaly and resolve the in-plane point.
fn orbital_plane_point(
    elements: &OrbitalElementSet,
    day: JulianDay,
    params: &SolverParams,
) -> Result<OrbitalPlanePoint, OrreryError> {
    let e = elements.eccentricity;
    let mean_anomaly = elements.mean_anomaly_at(day);

    match &elements.motion {
        OrbitalElements::Keplerian(ke) => {
            let ecc_anomaly = solve_elliptic_anomaly(mean_anomaly, e, params.elliptic_iterations)?;
            resolve_elliptic(ke.semi_major_axis, e, ecc_anomaly)
        }
        OrbitalElements::Cometary(ce) => {
            let hyp_anomaly = solve_hyperbolic_anomaly(
                mean_anomaly,
                e,
                params.hyperbolic_max_iterations,
                params.hyperbolic_tolerance,
            )?;
            resolve_hyperbolic(ce.semi_major_axis_magnitude(e), e, hyp_anomaly)
        }
    }
}

/// Compute the position at a Julian Day with explicit solver settings.
///
/// Arguments
/// -----------------
/// * `elements`: the body's element set (validated here).
/// * `day`: continuous day count of the instant.
/// * `params`: solver settings.
///
/// Return
/// ----------
/// * The position in AU, or the first error met along the pipeline.
///
/// Errors
/// ----------
/// * [`OrreryError::InvalidElements`] – the element set fails [`OrbitalElementSet::validate`].
/// * [`OrreryError::NonFinite`] – `day` or a pipeline stage is NaN/∞.
/// * [`OrreryError::NonConvergence`] – hyperbolic solver cap reached.
pub fn try_compute_position_at_day_with(
    elements: &OrbitalElementSet,
    day: JulianDay,
    params: &SolverParams,
) -> Result<PositionVector, OrreryError> {
    elements.validate()?;
    if !day.is_finite() {
        return Err(OrreryError::NonFinite("time normalizer"));
    }

    let point = orbital_plane_point(elements, day, params)?;
    let orientation = OrbitOrientation {
        periapsis_argument: elements.periapsis_argument_rad(),
        inclination: elements.inclination_rad(),
        ascending_node_longitude: elements.ascending_node_longitude_rad(),
    };
    let position = to_reference_frame(&point, &orientation);

    if position.iter().all(|c| c.is_finite()) {
        Ok(position.into())
    } else {
        Err(OrreryError::NonFinite("frame rotator"))
    }
}

/// [`try_compute_position_at_day_with`] using [`SolverParams::default`].
pub fn try_compute_position_at_day(
    elements: &OrbitalElementSet,
    day: JulianDay,
) -> Result<PositionVector, OrreryError> {
    try_compute_position_at_day_with(elements, day, &SolverParams::default())
}

/// Compute the position of a body at a calendar instant, surfacing failures.
///
/// Arguments
/// -----------------
/// * `elements`: the body's element set.
/// * `instant`: UTC instant of evaluation.
///
/// Return
/// ----------
/// * `Ok(PositionVector)` in AU, or the [`OrreryError`] raised along the pipeline.
///
/// See also
/// ------------
/// * [`compute_position`] – Infallible variant returning a logged sentinel.
pub fn try_compute_position(
    elements: &OrbitalElementSet,
    instant: &Epoch,
) -> Result<PositionVector, OrreryError> {
    try_compute_position_at_day(elements, to_continuous_day(instant))
}

/// [`try_compute_position`] with explicit solver settings.
pub fn try_compute_position_with(
    elements: &OrbitalElementSet,
    instant: &Epoch,
    params: &SolverParams,
) -> Result<PositionVector, OrreryError> {
    try_compute_position_at_day_with(elements, to_continuous_day(instant), params)
}

/// Compute the position at a Julian Day, never failing.
///
/// On error a warning is logged and [`PositionVector::UNAVAILABLE`] is returned.
pub fn compute_position_at_day(elements: &OrbitalElementSet, day: JulianDay) -> PositionVector {
    try_compute_position_at_day(elements, day).unwrap_or_else(|err| {
        warn!("position unavailable at JD {day}: {err}");
        PositionVector::UNAVAILABLE
    })
}

/// Compute the position of a body at a calendar instant, never failing.
///
/// This is the per-frame entry point of animation loops: a bad element set or a numerical
/// failure must not stop the loop. The failure is reported out of band through a
/// `log::warn!` record and the sentinel [`PositionVector::UNAVAILABLE`] is returned.
///
/// Arguments
/// -----------------
/// * `elements`: the body's element set.
/// * `instant`: UTC instant of evaluation.
///
/// Return
/// ----------
/// * The position in AU, or the sentinel (check with [`PositionVector::is_unavailable`]).
pub fn compute_position(elements: &OrbitalElementSet, instant: &Epoch) -> PositionVector {
    compute_position_at_day(elements, to_continuous_day(instant))
}

/// Sample a trajectory on an evenly spaced grid of days.
///
/// The grid starts at `start`, advances by `step` days and includes `end` when it falls on
/// the grid. Days whose propagation fails are skipped (with a `debug!` record), so the
/// returned trail only contains valid positions.
///
/// Arguments
/// -----------------
/// * `elements`: the body's element set.
/// * `start`, `end`: Julian Day bounds, `start ≤ end`.
/// * `step`: grid spacing in days, `> 0`.
///
/// Return
/// ----------
/// * The samples in increasing day order.
///
/// Errors
/// ----------
/// * [`OrreryError::InvalidSamplingGrid`] – non-finite bounds, `end < start`, `step ≤ 0`,
///   or a grid longer than [`MAX_TRAJECTORY_SAMPLES`].
pub fn sample_trajectory(
    elements: &OrbitalElementSet,
    start: JulianDay,
    end: JulianDay,
    step: Days,
) -> Result<Vec<TrajectorySample>, OrreryError> {
    sample_trajectory_with(elements, start, end, step, &SolverParams::default())
}

/// Largest number of grid points [`sample_trajectory`] accepts.
pub const MAX_TRAJECTORY_SAMPLES: usize = 1_000_000;

/// [`sample_trajectory`] with explicit solver settings.
pub fn sample_trajectory_with(
    elements: &OrbitalElementSet,
    start: JulianDay,
    end: JulianDay,
    step: Days,
    params: &SolverParams,
) -> Result<Vec<TrajectorySample>, OrreryError> {
    if !start.is_finite() || !end.is_finite() || !step.is_finite() {
        return Err(OrreryError::InvalidSamplingGrid(
            "bounds and step must be finite".into(),
        ));
    }
    if end < start {
        return Err(OrreryError::InvalidSamplingGrid(format!(
            "end (JD {end}) is before start (JD {start})"
        )));
    }
    if step <= 0.0 {
        return Err(OrreryError::InvalidSamplingGrid(format!(
            "step must be > 0 (got {step})"
        )));
    }

    // guard against the last point being lost to rounding
    let span = ((end - start) / step + 1e-9).floor();
    if !span.is_finite() || span + 1.0 > MAX_TRAJECTORY_SAMPLES as f64 {
        return Err(OrreryError::InvalidSamplingGrid(format!(
            "grid of JD {start}..{end} by {step} days exceeds {MAX_TRAJECTORY_SAMPLES} samples"
        )));
    }
    let count = span as usize + 1;

    let samples = (0..count)
        .map(|k| start + k as f64 * step)
        .filter_map(|day| match try_compute_position_at_day_with(elements, day, params) {
            Ok(position) => Some(TrajectorySample { day, position }),
            Err(err) => {
                debug!("trajectory sample at JD {day} skipped: {err}");
                None
            }
        })
        .collect();

    Ok(samples)
}
