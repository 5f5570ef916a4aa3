//! DMX512 transmitter.
//!
//! A transfer engine copies the universe (address incrementing) into the
//! timing engine's queue (fixed address). The timing engine sends break and
//! mark-after-break, then pulls bytes from its queue one at a time; each pull
//! raises the data request that paces the transfer engine.
//!
//! Every timer tick restarts the timing engine, so the next frame begins with
//! a fresh break, and re-arms the transfer engine with the full universe.
//! Chaining a second transfer channel to reload the first cannot work here,
//! since the break only comes from restarting the engine.
//!
//! Transmission only reads the buffer. Application code may change channel
//! values at any time; a change made while a frame is on the wire shows up in
//! that frame or the next one.

use embassy_time::{Duration, Instant};
use log::{debug, warn};

use crate::counter::FrameCounter;
use crate::error::IndexError;
use crate::hal::{Direction, PeriodicTimer, TimingEngine, TransferConfig, TransferEngine};
use crate::soft_timer::SoftTimer;
use crate::timing::{DEFAULT_PERIOD, min_frame_duration};
use crate::universe::Universe;

/// Configuration for the transmitter
#[derive(Debug, Clone, Copy)]
pub struct TransmitterConfig {
    /// GPIO the DMX line is driven on
    pub pin: u8,
    /// Time between the starts of two consecutive frames
    pub period: Duration,
}

impl TransmitterConfig {
    /// Configuration for `pin` with the default 50 ms period.
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            period: DEFAULT_PERIOD,
        }
    }
}

/// Lifecycle of a transmitter.
///
/// While `Running` the hardware loops through armed and transmitting on each
/// tick without software involvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitterState {
    Unstarted,
    Running,
    Paused,
}

/// DMX512 transmitter over a timing engine, a transfer engine and a timer.
///
/// The universe is borrowed for the driver's lifetime, which keeps its
/// address fixed while the transfer engine reads from it. Ticks are counted
/// into the borrowed `ticks` counter, which application code can poll
/// without going through the driver. Give each driver its own counter.
pub struct DmxTransmitter<'a, E, D, T>
where
    E: TimingEngine,
    D: TransferEngine,
    T: PeriodicTimer,
{
    universe: &'a Universe,
    ticks: &'a FrameCounter,
    engine: E,
    transfer: D,
    timer: T,
    period: Duration,
    state: TransmitterState,
}

impl<'a, E, D, T> DmxTransmitter<'a, E, D, T>
where
    E: TimingEngine,
    D: TransferEngine,
    T: PeriodicTimer,
{
    /// Bind the engines to `config.pin` and prepare them for transmission.
    ///
    /// Nothing is sent until [`DmxTransmitter::start`].
    pub fn new(
        config: &TransmitterConfig,
        universe: &'a Universe,
        ticks: &'a FrameCounter,
        mut engine: E,
        mut transfer: D,
        timer: T,
    ) -> Self {
        engine.bind(config.pin, Direction::Transmit);
        transfer.configure(TransferConfig::to_engine(engine.data_request()));

        debug!(
            "dmx tx: pin {} bound, {} channels",
            config.pin,
            universe.channels()
        );

        Self {
            universe,
            ticks,
            engine,
            transfer,
            timer,
            period: config.period,
            state: TransmitterState::Unstarted,
        }
    }

    /// Start sending a frame every configured period.
    pub fn start(&mut self) {
        self.start_with_period(self.period);
    }

    /// Start sending a frame every `period`.
    ///
    /// Resets the tick counter to zero.
    pub fn start_with_period(&mut self, period: Duration) {
        let frame = min_frame_duration(self.universe.slots());
        if period < frame {
            warn!(
                "dmx tx: period {} us is shorter than a {} slot frame ({} us)",
                period.as_micros(),
                self.universe.slots(),
                frame.as_micros()
            );
        }

        self.period = period;
        self.ticks.reset();
        self.state = TransmitterState::Running;
        self.timer.start(period);

        debug!("dmx tx: started, period {} ms", period.as_millis());
    }

    /// Stop retransmitting.
    ///
    /// The buffer keeps its contents and [`DmxTransmitter::start`] resumes.
    /// Does not wait for a frame already on the wire.
    pub fn pause(&mut self) {
        self.timer.cancel();
        self.engine.activate(false);
        self.state = TransmitterState::Paused;

        debug!("dmx tx: paused after {} frames", self.tick_count());
    }

    /// Timer interrupt handler: send the universe once more.
    ///
    /// If the previous frame is still being transferred the outcome is up to
    /// the hardware; a period no shorter than the frame time avoids that.
    pub fn on_tick(&mut self) {
        // Late tick after pause.
        if self.state != TransmitterState::Running {
            return;
        }

        self.engine.activate(true);
        self.engine.restart();
        self.transfer.arm(
            self.universe.base_address(),
            self.engine.queue_address(),
            self.universe.slots(),
            true,
        );
        self.ticks.increment();
    }

    /// Number of ticks since the last [`DmxTransmitter::start`].
    pub fn tick_count(&self) -> u32 {
        self.ticks.get()
    }

    /// Read slot `index` (0 is the start code).
    pub fn channel(&self, index: usize) -> Result<u8, IndexError> {
        self.universe.get(index)
    }

    /// Write slot `index` (0 is the start code).
    pub fn set_channel(&self, index: usize, value: u8) -> Result<(), IndexError> {
        self.universe.set(index, value)
    }

    pub const fn universe(&self) -> &'a Universe {
        self.universe
    }

    /// Tick counter shared with application code.
    pub const fn ticks(&self) -> &'a FrameCounter {
        self.ticks
    }

    pub const fn state(&self) -> TransmitterState {
        self.state
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }

    pub const fn transfer(&self) -> &D {
        &self.transfer
    }

    pub const fn timer(&self) -> &T {
        &self.timer
    }
}

impl<E, D> DmxTransmitter<'_, E, D, SoftTimer>
where
    E: TimingEngine,
    D: TransferEngine,
{
    /// Poll the software timer and transmit if a period has elapsed.
    ///
    /// Returns `true` when a frame was started.
    pub fn service(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.on_tick();
        true
    }
}

impl<E, D, T> Drop for DmxTransmitter<'_, E, D, T>
where
    E: TimingEngine,
    D: TransferEngine,
    T: PeriodicTimer,
{
    fn drop(&mut self) {
        self.timer.cancel();
        self.engine.activate(false);
        self.transfer.abort();
        self.engine.release();

        debug!("dmx tx: released");
    }
}
