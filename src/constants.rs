//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **conversion factors**, and
//! **unit type aliases** used throughout the `orrery` crate.
//!
//! ## Overview
//!
//! - Astronomical constants (Gaussian gravitational constant, J2000)
//! - Time scale anchors (Unix epoch expressed as a Julian Day)
//! - Unit conversions (degrees ↔ radians, days ↔ seconds)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian Day of the Unix epoch (1970-01-01 00:00:00 UTC)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian Day of J2000.0 (2000-01-01 12:00:00)
pub const J2000_JD: f64 = 2_451_545.0;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Gaussian gravitational constant k (AU^1.5 / day, calibrated for the Sun)
pub const GAUSS_GRAV: f64 = 0.01720209895;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Continuous day count (Julian Day, UTC based)
pub type JulianDay = f64;
/// Time span in days
pub type Days = f64;
