use hifitime::{Duration, Epoch};

use crate::constants::{Days, JulianDay, SECONDS_PER_DAY, UNIX_EPOCH_JD};

/// Transformation from a calendar instant to a continuous day count (Julian Day)
///
/// The day count is anchored on the Unix epoch:
/// `day = unix_seconds / 86400 + 2440587.5`.
///
/// Argument
/// --------
/// * `instant`: a UTC instant
///
/// Return
/// ------
/// * the Julian Day of the instant, monotonic in `instant`
pub fn to_continuous_day(instant: &Epoch) -> JulianDay {
    instant.to_unix_seconds() / SECONDS_PER_DAY + UNIX_EPOCH_JD
}

/// Transformation from a continuous day count (Julian Day) back to an instant
///
/// Argument
/// --------
/// * `day`: a Julian Day on the same scale as [`to_continuous_day`]
///
/// Return
/// ------
/// * the UTC instant corresponding to `day`
pub fn continuous_day_to_epoch(day: JulianDay) -> Epoch {
    Epoch::from_unix_seconds((day - UNIX_EPOCH_JD) * SECONDS_PER_DAY)
}

/// Speed-multiplied simulation clock.
///
/// The clock maps a real (wall-clock) instant onto a simulated instant:
/// `simulated = start + (real - anchor) * speed`.
/// The real instant is always supplied by the caller, the clock never reads the system time.
///
/// Changing the speed re-anchors the clock so that the simulated time stays continuous.
///
/// See also
/// ------------
/// * [`to_continuous_day`] – Converts the simulated instant into a day count for propagation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    simulated_start: Epoch,
    real_anchor: Epoch,
    speed: f64,
}

impl SimulationClock {
    /// Create a clock showing `simulated_start` at the real instant `real_anchor`.
    ///
    /// Arguments
    /// -----------------
    /// * `simulated_start`: simulated instant displayed at `real_anchor`.
    /// * `real_anchor`: wall-clock instant at which the clock is started.
    /// * `speed`: number of simulated seconds per real second (1.0 is real time,
    ///   negative values run backwards, 0.0 freezes the clock).
    pub fn new(simulated_start: Epoch, real_anchor: Epoch, speed: f64) -> Self {
        Self {
            simulated_start,
            real_anchor,
            speed,
        }
    }

    /// A clock following the wall clock at real-time speed.
    pub fn real_time(now: Epoch) -> Self {
        Self::new(now, now, 1.0)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Simulated instant at the real instant `real_now`.
    pub fn simulated_at(&self, real_now: Epoch) -> Epoch {
        let elapsed = (real_now - self.real_anchor).to_seconds();
        self.simulated_start + Duration::from_seconds(elapsed * self.speed)
    }

    /// Simulated Julian Day at the real instant `real_now`.
    pub fn simulated_day_at(&self, real_now: Epoch) -> JulianDay {
        to_continuous_day(&self.simulated_at(real_now))
    }

    /// Change the speed multiplier at the real instant `real_now`.
    ///
    /// The simulated time shown at `real_now` is unchanged; only its rate of change differs.
    pub fn set_speed(&mut self, real_now: Epoch, speed: f64) {
        self.simulated_start = self.simulated_at(real_now);
        self.real_anchor = real_now;
        self.speed = speed;
    }

    /// Jump the simulated time by `offset` days without touching the speed.
    pub fn shift_days(&mut self, offset: Days) {
        self.simulated_start = self.simulated_start + Duration::from_days(offset);
    }
}
