//! Software periodic timer.
//!
//! For platforms without a spare hardware alarm, or for host-side simulation.
//! The caller polls it with the current time; it reports when a period has
//! elapsed. Used as the transmitter's timer, [`DmxTransmitter::service`]
//! does the polling.
//!
//! [`DmxTransmitter::service`]: crate::DmxTransmitter::service

use embassy_time::{Duration, Instant};

use crate::hal::PeriodicTimer;

/// Polled periodic timer with drift correction.
///
/// This timer:
/// - Anchors its schedule at the first poll after [`PeriodicTimer::start`]
/// - Fires at most once per poll
/// - Skips the backlog if it falls more than two periods behind
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftTimer {
    period: Option<Duration>,
    next: Option<Instant>,
}

impl SoftTimer {
    /// Create a stopped timer.
    pub const fn new() -> Self {
        Self {
            period: None,
            next: None,
        }
    }

    /// Whether the timer is armed.
    pub const fn is_running(&self) -> bool {
        self.period.is_some()
    }

    /// Deadline of the next tick, once anchored.
    pub const fn next_deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Check whether a tick is due at `now`.
    ///
    /// The caller is responsible for calling this at least once per period.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(period) = self.period else {
            return false;
        };
        let Some(next) = self.next else {
            self.next = Some(now + period);
            return false;
        };

        // Fallen too far behind: reset to now instead of bursting through the
        // missed ticks.
        let max_drift = period * 2;
        if now > next + max_drift {
            self.next = Some(now + period);
            return true;
        }

        if now < next {
            return false;
        }
        self.next = Some(next + period);
        true
    }
}

impl PeriodicTimer for SoftTimer {
    fn start(&mut self, period: Duration) {
        self.period = Some(period);
        self.next = None;
    }

    fn cancel(&mut self) {
        self.period = None;
        self.next = None;
    }
}
