//! Fixed-period pacing for the monitor loop.
//!
//! Each iteration opens with one blocking delay of the configured period.
//! Time spent in the rest of the iteration is not subtracted, so the real
//! period is `period_ms` plus the cost of the sensor reads and the render.

use embedded_hal::delay::DelayNs;

pub struct Pacer {
    period_ms: u32,
    ticks: u64,
}

impl Pacer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            ticks: 0,
        }
    }

    /// Block for one full period.
    pub fn wait(&mut self, delay: &mut impl DelayNs) {
        delay.delay_ms(self.period_ms);
        self.ticks += 1;
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    /// Number of completed waits.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Idle forever after a terminal startup failure.
///
/// Sleeps in long slices so the RTOS idle task (and its watchdog) keeps
/// running. Only a reset leaves this state.
pub fn halt(delay: &mut impl DelayNs) -> ! {
    loop {
        delay.delay_ms(60_000);
    }
}
