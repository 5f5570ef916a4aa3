//! Recording stand-ins for the hardware seams.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use myrtio_dmx::{
    Direction, Duration, PeriodicTimer, TimingEngine, TransferConfig, TransferEngine,
    TransferTrigger,
};

pub const QUEUE_ADDRESS: usize = 0x5020_0010;
pub const DATA_REQUEST: TransferTrigger = TransferTrigger(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Bind(u8, Direction),
    Release,
    Activate(bool),
    Restart,
    FrameLength(usize),
    FrameInterrupt(bool),
    Configure(TransferConfig),
    Arm {
        source: usize,
        destination: usize,
        count: usize,
        start: bool,
    },
    Abort,
    TimerStart(Duration),
    TimerCancel,
}

/// Shared, ordered record of every call made on the mocks.
#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn count(&self, event: &Event) -> usize {
        self.0.borrow().iter().filter(|e| *e == event).count()
    }

    pub fn arms(&self) -> Vec<Event> {
        self.0
            .borrow()
            .iter()
            .filter(|e| matches!(e, Event::Arm { .. }))
            .copied()
            .collect()
    }
}

pub struct MockEngine {
    log: Log,
}

impl MockEngine {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl TimingEngine for MockEngine {
    fn bind(&mut self, pin: u8, direction: Direction) {
        self.log.push(Event::Bind(pin, direction));
    }

    fn release(&mut self) {
        self.log.push(Event::Release);
    }

    fn activate(&mut self, active: bool) {
        self.log.push(Event::Activate(active));
    }

    fn restart(&mut self) {
        self.log.push(Event::Restart);
    }

    fn set_frame_length(&mut self, slots: usize) {
        self.log.push(Event::FrameLength(slots));
    }

    fn set_frame_interrupt(&mut self, enabled: bool) {
        self.log.push(Event::FrameInterrupt(enabled));
    }

    fn queue_address(&self) -> usize {
        QUEUE_ADDRESS
    }

    fn data_request(&self) -> TransferTrigger {
        DATA_REQUEST
    }
}

pub struct MockTransfer {
    log: Log,
}

impl MockTransfer {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl TransferEngine for MockTransfer {
    fn configure(&mut self, config: TransferConfig) {
        self.log.push(Event::Configure(config));
    }

    fn arm(&mut self, source: usize, destination: usize, count: usize, start: bool) {
        self.log.push(Event::Arm {
            source,
            destination,
            count,
            start,
        });
    }

    fn abort(&mut self) {
        self.log.push(Event::Abort);
    }
}

pub struct MockTimer {
    log: Log,
}

impl MockTimer {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl PeriodicTimer for MockTimer {
    fn start(&mut self, period: Duration) {
        self.log.push(Event::TimerStart(period));
    }

    fn cancel(&mut self) {
        self.log.push(Event::TimerCancel);
    }
}
