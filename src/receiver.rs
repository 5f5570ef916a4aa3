//! DMX512 receiver.
//!
//! The timing engine watches the input pin continuously:
//!
//! 1. Wait for a run of low of at least 92 µs (break)
//! 2. Wait for the line to go high (mark-after-break, length not checked)
//! 3. Wait for a start bit, then sample 8 bits at 4 µs intervals
//! 4. Wait for the stop bit and push the byte to the queue
//! 5. Loop to 3 until a full frame has been pushed, then raise the
//!    frame-boundary interrupt and return to 1
//!
//! The transfer engine drains the queue (fixed address) into the universe
//! (address incrementing). If more bytes than a frame arrive, the transfer
//! stops at its count.
//!
//! # Race
//!
//! If a frame is shorter than the universe and the following break is short,
//! the next frame's bytes can arrive before [`DmxReceiver::on_frame_boundary`]
//! has re-armed the transfer engine, and that frame is partly lost or shifted.
//! No lock can change the line timing, so the handler is kept to two steps to
//! keep the window small.

use log::debug;

use crate::counter::FrameCounter;
use crate::error::IndexError;
use crate::hal::{Direction, TimingEngine, TransferConfig, TransferEngine};
use crate::universe::Universe;

/// Configuration for the receiver
#[derive(Debug, Clone, Copy)]
pub struct ReceiverConfig {
    /// GPIO the DMX line is sampled on
    pub pin: u8,
}

impl ReceiverConfig {
    pub const fn new(pin: u8) -> Self {
        Self { pin }
    }
}

/// Lifecycle of a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
    /// Engine disabled, nothing is received.
    Idle,
    /// Engine running; frames are received and counted by the interrupt.
    Armed,
}

/// DMX512 receiver over a timing engine and a transfer engine.
///
/// Received frames land in the borrowed universe and are counted into the
/// borrowed `frames` counter. Application code polls that counter (or
/// [`DmxReceiver::frame_count`]) to notice new frames. Give each driver its
/// own counter; a transmitter sharing the universe does not touch it.
pub struct DmxReceiver<'a, E, D>
where
    E: TimingEngine,
    D: TransferEngine,
{
    universe: &'a Universe,
    frames: &'a FrameCounter,
    engine: E,
    transfer: D,
    state: ReceiverState,
}

impl<'a, E, D> DmxReceiver<'a, E, D>
where
    E: TimingEngine,
    D: TransferEngine,
{
    /// Bind the engines to `config.pin` and enable the frame-boundary
    /// interrupt.
    ///
    /// Nothing is received until [`DmxReceiver::start`].
    pub fn new(
        config: &ReceiverConfig,
        universe: &'a Universe,
        frames: &'a FrameCounter,
        mut engine: E,
        mut transfer: D,
    ) -> Self {
        engine.bind(config.pin, Direction::Receive);
        transfer.configure(TransferConfig::from_engine(engine.data_request()));
        engine.set_frame_interrupt(true);

        debug!(
            "dmx rx: pin {} bound, {} channels",
            config.pin,
            universe.channels()
        );

        Self {
            universe,
            frames,
            engine,
            transfer,
            state: ReceiverState::Idle,
        }
    }

    /// Start (or resume) receiving.
    ///
    /// The frame counter keeps its value across pause and start.
    pub fn start(&mut self) {
        self.arm_transfer();
        self.engine.restart();
        self.engine.set_frame_length(self.universe.slots());
        self.engine.activate(true);
        self.state = ReceiverState::Armed;

        debug!("dmx rx: started at frame {}", self.frame_count());
    }

    /// Stop the timing engine.
    ///
    /// The transfer engine is left armed; [`DmxReceiver::start`] re-arms it.
    pub fn pause(&mut self) {
        self.engine.activate(false);
        self.state = ReceiverState::Idle;

        debug!("dmx rx: paused at frame {}", self.frame_count());
    }

    /// Frame-boundary interrupt handler.
    ///
    /// Re-arms the transfer for the next frame and counts the one just
    /// received. The timing engine is already waiting for the next break, so
    /// its state is not checked here.
    pub fn on_frame_boundary(&mut self) {
        self.arm_transfer();
        self.frames.increment();
    }

    /// Number of frames counted into this receiver's counter.
    ///
    /// Never reset by the receiver; pause and start keep counting on.
    pub fn frame_count(&self) -> u32 {
        self.frames.get()
    }

    /// Read slot `index` (0 is the start code).
    pub fn channel(&self, index: usize) -> Result<u8, IndexError> {
        self.universe.get(index)
    }

    pub const fn universe(&self) -> &'a Universe {
        self.universe
    }

    /// Frame counter shared with application code.
    pub const fn frames(&self) -> &'a FrameCounter {
        self.frames
    }

    pub const fn state(&self) -> ReceiverState {
        self.state
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn transfer(&self) -> &D {
        &self.transfer
    }

    fn arm_transfer(&mut self) {
        self.transfer.arm(
            self.engine.queue_address(),
            self.universe.base_address(),
            self.universe.slots(),
            true,
        );
    }
}

impl<E, D> Drop for DmxReceiver<'_, E, D>
where
    E: TimingEngine,
    D: TransferEngine,
{
    fn drop(&mut self) {
        self.engine.set_frame_interrupt(false);
        self.engine.activate(false);
        self.transfer.abort();
        self.engine.release();

        debug!("dmx rx: released");
    }
}
