//! Hardware seams.
//!
//! The drivers never touch registers directly. Implement these traits for a
//! platform's programmable I/O state machines, DMA channels and alarms; the
//! drivers are generic over them.
//!
//! Nothing here detects two drivers sharing the same state machine or DMA
//! channel. Handing the same unit to two drivers is undefined behaviour at the
//! hardware level and must be avoided by the caller.

use embassy_time::Duration;

/// Direction a timing engine is bound in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Generate break, mark-after-break and 8N2 bytes on the pin.
    Transmit,
    /// Detect break and mark-after-break, then sample 8N2 bytes from the pin.
    Receive,
}

/// Request line a transfer engine is paced by (a DREQ number on RP2040).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferTrigger(pub u8);

/// Addressing and pacing of a transfer engine channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferConfig {
    pub source_increment: bool,
    pub destination_increment: bool,
    pub trigger: TransferTrigger,
}

impl TransferConfig {
    /// Memory to engine queue: walk the buffer, write a fixed address.
    pub const fn to_engine(trigger: TransferTrigger) -> Self {
        Self {
            source_increment: true,
            destination_increment: false,
            trigger,
        }
    }

    /// Engine queue to memory: read a fixed address, walk the buffer.
    pub const fn from_engine(trigger: TransferTrigger) -> Self {
        Self {
            source_increment: false,
            destination_increment: true,
            trigger,
        }
    }
}

/// Programmable timing engine running the DMX bit-level program.
///
/// One instance per driver.
pub trait TimingEngine {
    /// Attach to `pin` and load the program for `direction`.
    ///
    /// In [`Direction::Receive`] the pin must be wired as both the data input
    /// and the jump input, so the program can re-test it for break, mark and
    /// start bit detection.
    fn bind(&mut self, pin: u8, direction: Direction);

    /// Detach from the pin and unload the program.
    fn release(&mut self);

    /// Enable or disable the state machine.
    fn activate(&mut self, active: bool);

    /// Reset the program's protocol phase.
    ///
    /// A transmitting engine sends break and mark-after-break next; a
    /// receiving engine waits for a break.
    fn restart(&mut self);

    /// Number of slots (start code included) that make up one frame.
    ///
    /// Receive only. The engine raises its frame-boundary interrupt once this
    /// many bytes were pushed to its queue.
    fn set_frame_length(&mut self, slots: usize);

    /// Enable or disable the frame-boundary interrupt. Receive only.
    fn set_frame_interrupt(&mut self, enabled: bool);

    /// Address of the engine's data queue as seen by the transfer engine.
    ///
    /// For a receiver this is the byte lane holding the sampled value, which
    /// depends on the platform's shift configuration.
    fn queue_address(&self) -> usize;

    /// Request line raised when the queue can accept or provide a byte.
    fn data_request(&self) -> TransferTrigger;
}

/// Bulk transfer engine moving bytes between memory and a timing engine.
///
/// One instance per driver.
pub trait TransferEngine {
    fn configure(&mut self, config: TransferConfig);

    /// Prime a copy of `count` bytes, paced by the configured trigger.
    ///
    /// When `start` is set the channel begins immediately; otherwise it waits
    /// to be triggered.
    fn arm(&mut self, source: usize, destination: usize, count: usize, start: bool);

    /// Stop the channel, discarding any remaining count.
    fn abort(&mut self);
}

/// Periodic alarm whose interrupt calls
/// [`DmxTransmitter::on_tick`](crate::DmxTransmitter::on_tick).
pub trait PeriodicTimer {
    fn start(&mut self, period: Duration);

    fn cancel(&mut self);
}
