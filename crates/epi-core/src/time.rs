//! Simulation time model.
//!
//! Time is a monotonically increasing step counter.  One simulated day is
//! `steps_per_day` steps (96 by default, i.e. 15-minute steps), which is
//! also the unit used to convert day-denominated averages from the
//! configuration into step counts.

use std::fmt;

/// Default number of steps in one simulated day (15-minute resolution).
pub const DEFAULT_STEPS_PER_DAY: u32 = 96;

/// Step counter that knows where day boundaries fall.
#[derive(Clone, Debug)]
pub struct StepClock {
    steps_per_day: u32,
    current: u64,
}

impl StepClock {
    /// A clock at step 0.  `steps_per_day` of 0 is treated as 1.
    pub fn new(steps_per_day: u32) -> Self {
        Self { steps_per_day: steps_per_day.max(1), current: 0 }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current += 1;
    }

    #[inline]
    pub fn current(&self) -> u64 {
        self.current
    }

    #[inline]
    pub fn steps_per_day(&self) -> u32 {
        self.steps_per_day
    }

    /// Zero-based day containing the current step.
    #[inline]
    pub fn day(&self) -> u64 {
        self.current / self.steps_per_day as u64
    }

    /// `true` on the first step of each day (including step 0).
    #[inline]
    pub fn is_day_start(&self) -> bool {
        self.current.is_multiple_of(self.steps_per_day as u64)
    }

    /// How many steps span `days` days.
    #[inline]
    pub fn steps_for_days(&self, days: u64) -> u64 {
        days * self.steps_per_day as u64
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} (day {})", self.current, self.day())
    }
}
