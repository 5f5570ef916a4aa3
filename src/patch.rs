//! Fixture patching.
//!
//! Maps a block of consecutive channels onto the levels an effect renderer
//! consumes. The renderer gets a [`FixturePatch`] as explicit configuration
//! and reads the universe through it.

use crate::error::{ConfigurationError, IndexError};
use crate::universe::{MAX_CHANNELS, Universe};

/// Levels of a six-channel fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureLevels {
    pub fader: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub fade: u8,
    pub speed: u8,
}

impl FixtureLevels {
    const fn to_bytes(self) -> [u8; FixturePatch::FOOTPRINT] {
        [
            self.fader, self.red, self.green, self.blue, self.fade, self.speed,
        ]
    }

    const fn from_bytes(bytes: [u8; FixturePatch::FOOTPRINT]) -> Self {
        Self {
            fader: bytes[0],
            red: bytes[1],
            green: bytes[2],
            blue: bytes[3],
            fade: bytes[4],
            speed: bytes[5],
        }
    }
}

/// Position of a fixture in a universe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixturePatch {
    address: u16,
}

impl FixturePatch {
    /// Number of channels the fixture occupies.
    pub const FOOTPRINT: usize = 6;

    /// Patch a fixture at channel `address`.
    ///
    /// The whole footprint must fit into a 512 channel universe.
    pub const fn new(address: u16) -> Result<Self, ConfigurationError> {
        let last = address as usize + Self::FOOTPRINT - 1;
        if address == 0 || last > MAX_CHANNELS {
            return Err(ConfigurationError::StartAddress(address));
        }
        Ok(Self { address })
    }

    pub const fn address(&self) -> u16 {
        self.address
    }

    /// Read the fixture's levels.
    ///
    /// Fails if the universe is too small for the patch.
    pub fn read(&self, universe: &Universe) -> Result<FixtureLevels, IndexError> {
        let mut bytes = [0; Self::FOOTPRINT];
        universe.read_slots(usize::from(self.address), &mut bytes)?;
        Ok(FixtureLevels::from_bytes(bytes))
    }

    /// Write the fixture's levels.
    pub fn write(&self, universe: &Universe, levels: FixtureLevels) -> Result<(), IndexError> {
        universe.write_slots(usize::from(self.address), &levels.to_bytes())
    }
}
