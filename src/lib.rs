//! DMX512 transmitter and receiver for programmable I/O and DMA engines.
//!
//! The protocol's byte timing (break, mark-after-break, 8N2 at 4 µs per bit)
//! is generated or decoded by a timing engine, and a transfer engine moves
//! bytes between memory and that engine without CPU work per byte. Software
//! only restarts the engines once per frame: from a timer tick when
//! transmitting, from the frame-boundary interrupt when receiving.
//!
//! Application code reads and writes the [`Universe`] directly and polls the
//! [`FrameCounter`] it handed to the driver. The universe is shared with the
//! hardware without a lock; see [`universe`] for what a reader can observe.
//!
//! Platforms implement the traits in [`hal`].
#![no_std]

pub mod counter;
pub mod error;
pub mod hal;
pub mod irq_cell;
pub mod patch;
pub mod receiver;
pub mod soft_timer;
pub mod timing;
pub mod transmitter;
pub mod universe;

pub use counter::{FrameCounter, FrameWatch};
pub use error::{ConfigurationError, IndexError};
pub use hal::{
    Direction, PeriodicTimer, TimingEngine, TransferConfig, TransferEngine, TransferTrigger,
};
pub use irq_cell::IrqCell;
pub use patch::{FixtureLevels, FixturePatch};
pub use receiver::{DmxReceiver, ReceiverConfig, ReceiverState};
pub use soft_timer::SoftTimer;
pub use transmitter::{DmxTransmitter, TransmitterConfig, TransmitterState};
pub use universe::{MAX_CHANNELS, MAX_SLOTS, NULL_START_CODE, Universe, UniverseDump};

pub use embassy_time::{Duration, Instant};
