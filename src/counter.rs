//! Frame counting shared between interrupt handlers and application code.
//!
//! A [`FrameCounter`] has exactly one writer: the interrupt context of the
//! driver it was handed to. Increments are a plain load followed by a
//! store, so they work on cores without compare-and-swap (Cortex-M0+).
//! Readers never block and always observe a value that was stored at some
//! point; the value never decreases except through [`FrameCounter::reset`]
//! or wrap-around at `u32::MAX`.

use core::sync::atomic::{AtomicU32, Ordering};

/// Monotonic, single-writer frame counter.
#[derive(Debug, Default)]
pub struct FrameCounter {
    count: AtomicU32,
}

impl FrameCounter {
    /// Create a counter starting at zero.
    pub const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
        }
    }

    /// Current value.
    pub fn get(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    /// Advance the counter by one.
    ///
    /// Must only be called from the owning driver's interrupt context.
    pub(crate) fn increment(&self) {
        let next = self.count.load(Ordering::Relaxed).wrapping_add(1);
        // Pairs with the Acquire in `get`.
        self.count.store(next, Ordering::Release);
    }

    /// Set the counter back to zero.
    ///
    /// Only valid while no interrupt context can increment it.
    pub(crate) fn reset(&self) {
        self.count.store(0, Ordering::Release);
    }
}

/// Detects counter changes from the application thread.
///
/// Keeps the last value seen so a polling loop can act once per new frame:
///
/// ```ignore
/// let mut watch = FrameWatch::new();
/// loop {
///     if let Some(frame) = watch.poll(&DMX_IN_FRAMES) {
///         handle_frame(frame, universe);
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameWatch {
    last: Option<u32>,
}

impl FrameWatch {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Returns the current count if it differs from the previous poll.
    ///
    /// The first poll always reports the current value.
    pub fn poll(&mut self, counter: &FrameCounter) -> Option<u32> {
        let current = counter.get();
        if self.last == Some(current) {
            return None;
        }
        self.last = Some(current);
        Some(current)
    }

    /// Last value reported by [`FrameWatch::poll`].
    pub const fn last(&self) -> Option<u32> {
        self.last
    }
}
