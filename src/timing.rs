//! DMX512 line timing.
//!
//! The timing engine enforces these values in hardware; the drivers use them
//! to sanity check the transmit period.

use embassy_time::Duration;

use crate::universe::MAX_SLOTS;

/// Line rate in bits per second.
pub const BAUD_RATE: u32 = 250_000;

/// Duration of one bit.
pub const BIT_TIME: Duration = Duration::from_micros(4);

/// Start bit, 8 data bits, 2 stop bits.
pub const BITS_PER_SLOT: u64 = 11;

/// Clock the timing engine program runs at (1 µs per instruction).
pub const ENGINE_CLOCK_HZ: u32 = 1_000_000;

/// Shortest break a receiver accepts.
pub const BREAK_MIN: Duration = Duration::from_micros(92);

/// Shortest mark-after-break.
pub const MARK_AFTER_BREAK_MIN: Duration = Duration::from_micros(12);

/// Shortest time between two consecutive breaks.
pub const BREAK_TO_BREAK_MIN: Duration = Duration::from_micros(1204);

/// Default retransmission period.
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(50);

/// Shortest time a frame of `slots` slots can occupy the line.
///
/// `slots` is clamped to a full universe.
pub const fn min_frame_duration(slots: usize) -> Duration {
    let slots = if slots > MAX_SLOTS { MAX_SLOTS } else { slots };
    let data = BIT_TIME.as_micros() * BITS_PER_SLOT * slots as u64;
    let total = BREAK_MIN.as_micros() + MARK_AFTER_BREAK_MIN.as_micros() + data;
    if total < BREAK_TO_BREAK_MIN.as_micros() {
        BREAK_TO_BREAK_MIN
    } else {
        Duration::from_micros(total)
    }
}

/// Highest standard-compliant refresh rate for `slots` slots, in frames per
/// second.
///
/// About 44 for a full universe of 513 slots.
#[allow(clippy::cast_possible_truncation)]
pub const fn max_refresh_rate(slots: usize) -> u32 {
    // At most 1_000_000 / 1204.
    (1_000_000 / min_frame_duration(slots).as_micros()) as u32
}
