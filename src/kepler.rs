//! # Kepler equation solvers
//!
//! Solvers for the two branches of the two-body problem:
//!
//! - **Elliptical** (`0 ≤ e < 1`): `E = M + e·sin(E)` solved by fixed-point iteration,
//!   seeded at `E₀ = M`, for a fixed number of iterations.
//! - **Hyperbolic** (`e > 1`): `e·sinh(H) − H = M` solved by Newton–Raphson with an
//!   early stop on the residual and an iteration cap.
//!
//! The mean anomaly is **never** range-reduced: the solvers work for any `M`, so a body
//! may be simulated over arbitrarily long spans.
//!
//! Numerical settings are grouped in [`SolverParams`], built with a validating builder.

use std::cmp::Ordering::Greater;

use log::trace;

use crate::{constants::Radian, orrery_errors::OrreryError};

/// Number of fixed-point iterations of the elliptical solver.
///
/// The error after `n` iterations is bounded by `eⁿ⁺¹`: ten iterations give ~1e-10 rad for
/// the planets (`e < 0.21`) but only ~0.6 rad at `e = 0.95`. Very high eccentricities converge
/// slowly; this is an accepted approximation of the fixed-count scheme.
pub const ELLIPTIC_ITERATIONS: usize = 10;

/// Maximum number of Newton steps of the hyperbolic solver.
pub const HYPERBOLIC_MAX_ITERATIONS: usize = 15;

/// Stop threshold of the hyperbolic solver, applied to the residual `|e·sinh(H) − H − M|`
/// (scaled by `max(1, |M|)`) and to the Newton step (scaled by `max(1, |H|)`).
pub const HYPERBOLIC_TOLERANCE: f64 = 1e-10;

/// Numerical settings of the anomaly solvers.
///
/// Defaults
/// -----------------
/// * `elliptic_iterations`: [`ELLIPTIC_ITERATIONS`] (10)
/// * `hyperbolic_max_iterations`: [`HYPERBOLIC_MAX_ITERATIONS`] (15)
/// * `hyperbolic_tolerance`: [`HYPERBOLIC_TOLERANCE`] (1e-10)
///
/// See also
/// -----------------
/// * [`SolverParams::builder`] – Fluent, validated construction.
/// * [`solve_elliptic_anomaly`] / [`solve_hyperbolic_anomaly`] – Consumers of these settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParams {
    /// Fixed number of fixed-point iterations for `E = M + e·sin(E)`.
    pub elliptic_iterations: usize,
    /// Newton iteration cap for `e·sinh(H) − H = M`.
    pub hyperbolic_max_iterations: usize,
    /// Residual and step threshold of the hyperbolic Newton solver.
    pub hyperbolic_tolerance: f64,
}

impl SolverParams {
    /// Construct a new [`SolverParams`] with the documented defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SolverParamsBuilder`] to override the defaults step by step.
    ///
    /// # Example
    ///
    /// ```rust
    /// use orrery::kepler::SolverParams;
    ///
    /// let params = SolverParams::builder()
    ///     .elliptic_iterations(7)
    ///     .hyperbolic_tolerance(1e-12)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(params.elliptic_iterations, 7);
    /// ```
    pub fn builder() -> SolverParamsBuilder {
        SolverParamsBuilder::new()
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            elliptic_iterations: ELLIPTIC_ITERATIONS,
            hyperbolic_max_iterations: HYPERBOLIC_MAX_ITERATIONS,
            hyperbolic_tolerance: HYPERBOLIC_TOLERANCE,
        }
    }
}

/// Builder for [`SolverParams`], with validation.
#[derive(Debug, Clone)]
pub struct SolverParamsBuilder {
    params: SolverParams,
}

impl Default for SolverParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: SolverParams::default(),
        }
    }

    pub fn elliptic_iterations(mut self, v: usize) -> Self {
        self.params.elliptic_iterations = v;
        self
    }
    pub fn hyperbolic_max_iterations(mut self, v: usize) -> Self {
        self.params.hyperbolic_max_iterations = v;
        self
    }
    pub fn hyperbolic_tolerance(mut self, v: f64) -> Self {
        self.params.hyperbolic_tolerance = v;
        self
    }

    /// Finalize the builder and produce a [`SolverParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `elliptic_iterations ≥ 1`
    /// * `hyperbolic_max_iterations ≥ 1`
    /// * `hyperbolic_tolerance` finite and `> 0.0`
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SolverParams)` if all values are valid.
    /// * `Err(OrreryError::InvalidSolverParams)` otherwise.
    pub fn build(self) -> Result<SolverParams, OrreryError> {
        let p = self.params;

        if p.elliptic_iterations == 0 {
            return Err(OrreryError::InvalidSolverParams(
                "elliptic_iterations must be at least 1".into(),
            ));
        }
        if p.hyperbolic_max_iterations == 0 {
            return Err(OrreryError::InvalidSolverParams(
                "hyperbolic_max_iterations must be at least 1".into(),
            ));
        }
        // NaN compares as None and is rejected with the non-positive values
        if !p.hyperbolic_tolerance.is_finite()
            || p.hyperbolic_tolerance.partial_cmp(&0.0) != Some(Greater)
        {
            return Err(OrreryError::InvalidSolverParams(format!(
                "hyperbolic_tolerance must be finite and > 0 (got {})",
                p.hyperbolic_tolerance
            )));
        }

        Ok(p)
    }
}

/// Solve Kepler's equation `E = M + e·sin(E)` for the eccentric anomaly.
///
/// Fixed-point iteration seeded at `E₀ = M`, run exactly `iterations` times.
/// `M` is used as given, without reduction modulo 2π.
///
/// Arguments
/// -----------------
/// * `mean_anomaly`: mean anomaly `M` (radians, any magnitude).
/// * `eccentricity`: `e` in `[0, 1)`.
/// * `iterations`: number of fixed-point steps (see [`ELLIPTIC_ITERATIONS`]).
///
/// Return
/// ----------
/// * The eccentric anomaly `E` (radians, same revolution count as `M`).
///
/// Errors
/// ----------
/// * [`OrreryError::InvalidElements`] if `e` is outside `[0, 1)`.
/// * [`OrreryError::NonFinite`] if `M` or the result is not finite.
pub fn solve_elliptic_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
    iterations: usize,
) -> Result<Radian, OrreryError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(OrreryError::InvalidElements(format!(
            "elliptic solver requires 0 <= e < 1 (got {eccentricity})"
        )));
    }
    if !mean_anomaly.is_finite() {
        return Err(OrreryError::NonFinite("elliptic anomaly solver"));
    }

    let mut ecc_anomaly = mean_anomaly;
    for _ in 0..iterations {
        ecc_anomaly = mean_anomaly + eccentricity * ecc_anomaly.sin();
    }

    if !ecc_anomaly.is_finite() {
        return Err(OrreryError::NonFinite("elliptic anomaly solver"));
    }
    Ok(ecc_anomaly)
}

/// Starting point of the hyperbolic Newton iteration.
///
/// * `|M| > e`: the asymptotic solution `sign(M)·ln(2|M|/e + 1.8)` of `e·sinh(H) ≈ M`.
///   Starting from `H₀ = M` there, Newton only shrinks `H` by about one unit per step.
/// * `|M| ≤ e`: the real root of the cubic truncation `(e − 1)·H + e·H³/6 = M`.
///   It stays accurate when `e − 1` is tiny, where `f'(H)` vanishes at the origin and
///   `H₀ = M` is thrown far out by the first step.
///
/// The cubic under-estimates `e·sinh(H) − H`, so its root lies at or beyond the solution and
/// Newton then converges monotonically on the convex branch.
fn hyperbolic_seed(mean_anomaly: Radian, eccentricity: f64) -> Radian {
    if mean_anomaly == 0.0 {
        return 0.0;
    }
    let m = mean_anomaly.abs();

    if m > eccentricity {
        return mean_anomaly.signum() * (2.0 * m / eccentricity + 1.8).ln();
    }

    // H³ + p·H − q = 0, one real root since p, q > 0
    let p = 6.0 * (eccentricity - 1.0) / eccentricity;
    let q = 6.0 * m / eccentricity;
    let u = (0.5 * q + (0.25 * q * q + p * p * p / 27.0).sqrt()).cbrt();
    let v = -p / (3.0 * u);
    // H = u + v, written as q / (u² − uv + v²) to avoid cancellation
    mean_anomaly.signum() * q / (u * u + p / 3.0 + v * v)
}

/// Solve the hyperbolic Kepler equation `e·sinh(H) − H = M` for the hyperbolic anomaly.
///
/// Newton–Raphson on `f(H) = e·sinh(H) − H − M` with `f'(H) = e·cosh(H) − 1`.
/// The iteration stops once both
///
/// * the residual is small, `|f(H)| < tolerance·max(1, |M|)`, and
/// * the Newton step is small, `|f(H) / f'(H)| < tolerance·max(1, |H|)`.
///
/// The relative scaling of the residual keeps the criterion reachable in double precision for
/// large `|M|`. The step criterion matters near the parabolic limit, where `f'` is close to
/// zero and a small residual still leaves `H` inaccurate.
///
/// Arguments
/// -----------------
/// * `mean_anomaly`: hyperbolic mean anomaly `M` (radians).
/// * `eccentricity`: `e > 1`.
/// * `max_iterations`: Newton step cap (see [`HYPERBOLIC_MAX_ITERATIONS`]).
/// * `tolerance`: residual and step threshold (see [`HYPERBOLIC_TOLERANCE`]).
///
/// Return
/// ----------
/// * The hyperbolic anomaly `H` (radians, same sign as `M`).
///
/// Errors
/// ----------
/// * [`OrreryError::InvalidElements`] if `e ≤ 1`.
/// * [`OrreryError::NonFinite`] if `M` or any iterate is not finite.
/// * [`OrreryError::NonConvergence`] if the cap is reached before the threshold.
pub fn solve_hyperbolic_anomaly(
    mean_anomaly: Radian,
    eccentricity: f64,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Radian, OrreryError> {
    if eccentricity.partial_cmp(&1.0) != Some(Greater) {
        return Err(OrreryError::InvalidElements(format!(
            "hyperbolic solver requires e > 1 (got {eccentricity})"
        )));
    }
    if !mean_anomaly.is_finite() {
        return Err(OrreryError::NonFinite("hyperbolic anomaly solver"));
    }

    let kepler_residual = |h: f64| eccentricity * h.sinh() - h - mean_anomaly;
    let threshold = tolerance * mean_anomaly.abs().max(1.0);

    let mut hyp_anomaly = hyperbolic_seed(mean_anomaly, eccentricity);
    let mut residual = kepler_residual(hyp_anomaly);
    let mut iterations = 0;

    loop {
        if !residual.is_finite() {
            return Err(OrreryError::NonFinite("hyperbolic anomaly solver"));
        }

        // f'(H) >= e - 1 > 0
        let step = residual / (eccentricity * hyp_anomaly.cosh() - 1.0);
        if residual.abs() < threshold && step.abs() < tolerance * hyp_anomaly.abs().max(1.0) {
            hyp_anomaly -= step;
            break;
        }
        if iterations == max_iterations {
            return Err(OrreryError::NonConvergence {
                iterations,
                residual,
            });
        }

        hyp_anomaly -= step;
        residual = kepler_residual(hyp_anomaly);
        iterations += 1;
    }

    trace!("hyperbolic Kepler solver converged in {iterations} iterations (M = {mean_anomaly})");
    Ok(hyp_anomaly)
}
