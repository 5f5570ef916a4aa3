//! DMX universe buffer shared between hardware and application code.
//!
//! Slot 0 holds the start code, slots `1..=channels` hold channel values.
//! The backing storage is a fixed array of atomic bytes sized for the largest
//! universe, so a universe is allocation-free and can live in a `static`.
//!
//! The buffer is written or read by a transfer engine while application code
//! accesses it through the methods below. There is no lock: every access is
//! a single relaxed byte load or store behind a bounds check. A reader racing
//! with an in-flight transfer may see a mix of old and new bytes, never an
//! out-of-range access.
//!
//! A universe carries no frame count; each driver counts into its own
//! [`FrameCounter`](crate::FrameCounter). The same universe may therefore be
//! borrowed by a receiver and a transmitter at once (receive and retransmit),
//! with the transmitter sending whatever the receiver last stored.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use heapless::Vec;

use crate::error::{ConfigurationError, IndexError};

/// Largest number of channels in a DMX universe.
pub const MAX_CHANNELS: usize = 512;

/// Largest number of slots (start code + channels).
pub const MAX_SLOTS: usize = MAX_CHANNELS + 1;

/// Start code for standard dimmer data.
pub const NULL_START_CODE: u8 = 0;

/// Fixed-length DMX universe.
#[derive(Debug)]
pub struct Universe {
    slots: [AtomicU8; MAX_SLOTS],
    channels: usize,
}

impl Universe {
    /// Create a zero-filled universe of `channels` channels.
    ///
    /// Fails unless `1 <= channels <= 512`.
    pub const fn new(channels: usize) -> Result<Self, ConfigurationError> {
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(ConfigurationError::UniverseSize(channels));
        }
        Ok(Self {
            slots: [const { AtomicU8::new(0) }; MAX_SLOTS],
            channels,
        })
    }

    /// Create a zero-filled universe with all 512 channels.
    pub const fn full() -> Self {
        Self {
            slots: [const { AtomicU8::new(0) }; MAX_SLOTS],
            channels: MAX_CHANNELS,
        }
    }

    /// Number of channels, excluding the start code.
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Number of slots, start code included. This is the length of one frame.
    pub const fn slots(&self) -> usize {
        self.channels + 1
    }

    /// Read slot `index`.
    pub fn get(&self, index: usize) -> Result<u8, IndexError> {
        self.slot(index).map(|slot| slot.load(Ordering::Relaxed))
    }

    /// Write `value` into slot `index`.
    pub fn set(&self, index: usize, value: u8) -> Result<(), IndexError> {
        self.slot(index).map(|slot| slot.store(value, Ordering::Relaxed))
    }

    pub fn start_code(&self) -> u8 {
        self.slots[0].load(Ordering::Relaxed)
    }

    pub fn set_start_code(&self, value: u8) {
        self.slots[0].store(value, Ordering::Relaxed);
    }

    /// Copy `data` into consecutive slots beginning at `start`.
    ///
    /// The whole range is checked first; on error no slot is modified.
    pub fn write_slots(&self, start: usize, data: &[u8]) -> Result<(), IndexError> {
        let range = self.checked_range(start, data.len())?;
        for (slot, value) in self.slots[range].iter().zip(data) {
            slot.store(*value, Ordering::Relaxed);
        }
        Ok(())
    }

    /// Copy consecutive slots beginning at `start` into `out`.
    pub fn read_slots(&self, start: usize, out: &mut [u8]) -> Result<(), IndexError> {
        let range = self.checked_range(start, out.len())?;
        for (value, slot) in out.iter_mut().zip(&self.slots[range]) {
            *value = slot.load(Ordering::Relaxed);
        }
        Ok(())
    }

    /// Copy of every slot, start code first.
    ///
    /// Not atomic as a whole: taken while a transfer is running it may hold
    /// bytes from two different frames.
    pub fn snapshot(&self) -> Vec<u8, MAX_SLOTS> {
        self.slots[..self.slots()]
            .iter()
            .map(|slot| slot.load(Ordering::Relaxed))
            .collect()
    }

    /// Memory address of slot 0, used to program a transfer engine.
    ///
    /// Stable for as long as the universe is borrowed.
    pub fn base_address(&self) -> usize {
        self.slots.as_ptr() as usize
    }

    /// Human readable dump of the universe.
    pub const fn dump(&self) -> UniverseDump<'_> {
        UniverseDump { universe: self }
    }

    fn slot(&self, index: usize) -> Result<&AtomicU8, IndexError> {
        if index > self.channels {
            return Err(IndexError {
                index,
                slots: self.slots(),
            });
        }
        Ok(&self.slots[index])
    }

    fn checked_range(
        &self,
        start: usize,
        len: usize,
    ) -> Result<core::ops::Range<usize>, IndexError> {
        let slots = self.slots();
        match start.checked_add(len) {
            Some(end) if end <= slots => Ok(start..end),
            _ => Err(IndexError {
                index: start.max(slots),
                slots,
            }),
        }
    }
}

impl fmt::Display for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.dump().fmt(f)
    }
}

/// Diagnostic layout of a universe.
///
/// ```text
/// Start code: 0
///
/// 001:     0   0   0   0   0     0   0 ...
/// 021:     0   0 ...
/// ```
///
/// Rows hold 20 channels and start with the channel number padded to three
/// digits, groups of five are separated by two extra spaces and every 100th
/// channel is followed by a blank line.
pub struct UniverseDump<'a> {
    universe: &'a Universe,
}

impl fmt::Display for UniverseDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let universe = self.universe;
        writeln!(f, "Start code: {}", universe.start_code())?;

        for (channel, slot) in universe.slots[..universe.slots()]
            .iter()
            .enumerate()
            .skip(1)
        {
            if channel % 20 == 1 {
                write!(f, "\n{:03}:", channel)?;
            }
            if channel % 5 == 1 {
                f.write_str("  ")?;
            }
            write!(f, " {:3}", slot.load(Ordering::Relaxed))?;
            if channel % 100 == 0 {
                f.write_str("\n")?;
            }
        }

        f.write_str("\n")
    }
}
