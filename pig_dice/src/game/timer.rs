//! The game clock and the optional game-length limit.

use std::fmt;
use std::time::{Duration, Instant};

/// Monotonic time source for the game timer. Injectable so tests can drive
/// elapsed time by hand.
pub trait Clock: fmt::Debug {
    /// Time elapsed since the clock started.
    fn elapsed(&self) -> Duration;
}

/// Wall clock measuring from construction.
#[derive(Clone, Debug)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Game-length limit, checked once per turn boundary. A turn in progress
/// always completes before the limit is re-evaluated.
#[derive(Debug)]
pub struct GameTimer {
    clock: Box<dyn Clock>,
    limit: Duration,
}

impl GameTimer {
    /// A timer over the system clock, starting now.
    #[must_use]
    pub fn new(limit: Duration) -> Self {
        Self::with_clock(limit, Box::new(SystemClock::new()))
    }

    /// A timer over a caller-supplied clock.
    #[must_use]
    pub fn with_clock(limit: Duration, clock: Box<dyn Clock>) -> Self {
        Self { clock, limit }
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.clock.elapsed() >= self.limit
    }

    #[must_use]
    pub fn limit(&self) -> Duration {
        self.limit
    }
}
