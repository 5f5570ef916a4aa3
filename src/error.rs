use core::fmt;

use crate::universe::MAX_CHANNELS;

/// Error returned when a driver or universe is built with invalid parameters.
///
/// Raised synchronously at construction time. A failed construction yields no
/// usable instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Universe size outside `1..=512` channels.
    UniverseSize(usize),
    /// Fixture start address does not leave room for its footprint.
    StartAddress(u16),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UniverseSize(size) => write!(
                f,
                "DMX universes must have 1...{} channels, got {}",
                MAX_CHANNELS, size
            ),
            Self::StartAddress(address) => {
                write!(f, "fixture start address {} is out of range", address)
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// Error returned when a slot index falls outside the universe.
///
/// `slots` is the number of addressable slots, start code included, so valid
/// indices are `0..slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    pub index: usize,
    pub slots: usize,
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slot {} is out of range for a universe of {} slots",
            self.index, self.slots
        )
    }
}

impl core::error::Error for IndexError {}
