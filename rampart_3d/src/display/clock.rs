/// Wall-clock abstraction for the display timers.
///
/// The movie hold and copyright timers only need milliseconds since some
/// epoch. Tests inject a manual clock and step it explicitly.

use std::time::Instant;

pub trait Clock: Send {
    /// Milliseconds since an arbitrary fixed epoch
    fn now_ms(&self) -> u64;
}

/// Real clock, measured from construction
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}
