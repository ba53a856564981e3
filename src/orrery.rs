//! # Orrery: body catalog and propagation settings
//!
//! This module defines the [`Orrery`](crate::orrery::Orrery) struct, the façade that ties together:
//!
//! 1. **Body catalog** ([`BodyCatalog`](crate::catalog::BodyCatalog)): the immutable element sets
//!    of every simulated body, with their display metadata.
//! 2. **Solver settings** ([`SolverParams`](crate::kepler::SolverParams)): iteration counts and
//!    tolerance of the anomaly solvers, applied to every propagation.
//!
//! An [`Orrery`] holds no mutable state: it is built once at startup and can be shared across
//! threads (`&Orrery` is `Send + Sync`).
//!
//! ## Typical usage
//!
//! ```rust
//! use hifitime::Epoch;
//! use orrery::orrery::Orrery;
//!
//! let orrery = Orrery::builtin();
//! let instant = Epoch::from_gregorian_utc_at_midnight(2025, 12, 19);
//!
//! // once per rendered frame
//! for body in orrery.positions_at(&instant) {
//!     if body.available {
//!         println!("{}: {:?}", body.id, body.position);
//!     }
//! }
//!
//! // comet–Earth distance
//! let d = orrery
//!     .distance_between(&"3I/ATLAS".into(), &"earth".into(), &instant)
//!     .unwrap();
//! assert!(d > 0.0);
//! ```
//!
//! ## See also
//! * [`crate::propagator`] – Stateless propagation functions used by every method.
//! * [`BodyCatalog::from_json_file`](crate::catalog::BodyCatalog::from_json_file) – JSON configuration.

use std::path::Path;

use hifitime::Epoch;
use log::warn;
use serde::Serialize;

use crate::{
    catalog::{BodyCatalog, BodyId},
    constants::{AstronomicalUnit, Days, JulianDay},
    kepler::SolverParams,
    orrery_errors::OrreryError,
    propagator::{
        sample_trajectory_with, try_compute_position_at_day_with, PositionVector,
        TrajectorySample,
    },
    time::to_continuous_day,
};

/// Position of one catalog body at a given instant.
///
/// When the propagation failed, `available` is `false` and `position` holds
/// [`PositionVector::UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyPosition {
    pub id: BodyId,
    pub position: PositionVector,
    pub available: bool,
}

#[derive(Debug, Clone)]
pub struct Orrery {
    catalog: BodyCatalog,
    solver_params: SolverParams,
}

impl Orrery {
    /// Construct a new [`Orrery`] over a catalog, with default solver settings.
    pub fn new(catalog: BodyCatalog) -> Self {
        Orrery {
            catalog,
            solver_params: SolverParams::default(),
        }
    }

    /// An [`Orrery`] over [`BodyCatalog::builtin`]: the eight planets and 3I/ATLAS.
    pub fn builtin() -> Self {
        Self::new(BodyCatalog::builtin())
    }

    /// Construct an [`Orrery`] from a JSON catalog file.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: JSON file holding a list of [`ElementRecord`](crate::catalog::ElementRecord)s.
    ///
    /// Return
    /// ----------
    /// * A new [`Orrery`], or the [`OrreryError`] raised while reading or validating the file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, OrreryError> {
        Ok(Self::new(BodyCatalog::from_json_file(path)?))
    }

    /// Replace the solver settings.
    pub fn with_solver_params(mut self, solver_params: SolverParams) -> Self {
        self.solver_params = solver_params;
        self
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn solver_params(&self) -> &SolverParams {
        &self.solver_params
    }

    /// Position of a catalog body at a Julian Day.
    pub fn position_of_at_day(
        &self,
        id: &BodyId,
        day: JulianDay,
    ) -> Result<PositionVector, OrreryError> {
        let elements = self.catalog.elements_of(id)?;
        try_compute_position_at_day_with(elements, day, &self.solver_params)
    }

    /// Position of a catalog body at an instant.
    ///
    /// Arguments
    /// -----------------
    /// * `id`: identifier of the body (case-insensitive).
    /// * `instant`: UTC instant of evaluation.
    ///
    /// Return
    /// ----------
    /// * The heliocentric position in AU.
    ///
    /// Errors
    /// ----------
    /// * [`OrreryError::UnknownBody`] if `id` is not in the catalog.
    /// * Any propagation error, see [`crate::propagator::try_compute_position`].
    pub fn position_of(
        &self,
        id: &BodyId,
        instant: &Epoch,
    ) -> Result<PositionVector, OrreryError> {
        self.position_of_at_day(id, to_continuous_day(instant))
    }

    /// Positions of every catalog body at an instant, in catalog order.
    ///
    /// This is the per-frame call: it never fails. A body whose propagation fails is reported
    /// with `available = false` and the sentinel position, and a warning naming the body is
    /// logged.
    pub fn positions_at(&self, instant: &Epoch) -> Vec<BodyPosition> {
        let day = to_continuous_day(instant);

        self.catalog
            .iter()
            .map(|entry| {
                match try_compute_position_at_day_with(&entry.elements, day, &self.solver_params) {
                    Ok(position) => BodyPosition {
                        id: entry.id.clone(),
                        position,
                        available: true,
                    },
                    Err(err) => {
                        warn!("{}: position unavailable at JD {day}: {err}", entry.id);
                        BodyPosition {
                            id: entry.id.clone(),
                            position: PositionVector::UNAVAILABLE,
                            available: false,
                        }
                    }
                }
            })
            .collect()
    }

    /// Distance between two catalog bodies at an instant (AU).
    pub fn distance_between(
        &self,
        a: &BodyId,
        b: &BodyId,
        instant: &Epoch,
    ) -> Result<AstronomicalUnit, OrreryError> {
        let day = to_continuous_day(instant);
        let pos_a = self.position_of_at_day(a, day)?;
        let pos_b = self.position_of_at_day(b, day)?;
        Ok(pos_a.distance_to(&pos_b))
    }

    /// Sampled trail of a catalog body between two Julian Days.
    ///
    /// See also
    /// ------------
    /// * [`sample_trajectory`](crate::propagator::sample_trajectory) – Grid and skipping rules.
    pub fn trail(
        &self,
        id: &BodyId,
        start: JulianDay,
        end: JulianDay,
        step: Days,
    ) -> Result<Vec<TrajectorySample>, OrreryError> {
        let elements = self.catalog.elements_of(id)?;
        sample_trajectory_with(elements, start, end, step, &self.solver_params)
    }
}

impl Default for Orrery {
    fn default() -> Self {
        Self::builtin()
    }
}
