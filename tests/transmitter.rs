mod support;

mod tests {
    use myrtio_dmx::{
        Direction, DmxTransmitter, Duration, FrameCounter, Instant, SoftTimer, TransferConfig,
        TransmitterConfig, TransmitterState, Universe,
    };

    use crate::support::{
        DATA_REQUEST, Event, Log, MockEngine, MockTimer, MockTransfer, QUEUE_ADDRESS,
    };

    const PIN: u8 = 15;

    fn transmitter<'a>(
        universe: &'a Universe,
        ticks: &'a FrameCounter,
        log: &Log,
    ) -> DmxTransmitter<'a, MockEngine, MockTransfer, MockTimer> {
        DmxTransmitter::new(
            &TransmitterConfig::new(PIN),
            universe,
            ticks,
            MockEngine::new(log),
            MockTransfer::new(log),
            MockTimer::new(log),
        )
    }

    #[test]
    fn test_default_config() {
        let config = TransmitterConfig::new(PIN);
        assert_eq!(config.pin, PIN);
        assert_eq!(config.period, Duration::from_millis(50));
    }

    #[test]
    fn test_new_binds_and_configures() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let tx = transmitter(&universe, &ticks, &log);

        assert_eq!(
            log.events(),
            vec![
                Event::Bind(PIN, Direction::Transmit),
                Event::Configure(TransferConfig {
                    source_increment: true,
                    destination_increment: false,
                    trigger: DATA_REQUEST,
                }),
            ]
        );
        assert_eq!(tx.state(), TransmitterState::Unstarted);
        assert_eq!(tx.tick_count(), 0);
    }

    #[test]
    fn test_ticks_leave_buffer_unchanged() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = transmitter(&universe, &ticks, &log);

        for (channel, value) in [10, 20, 30, 40, 50].into_iter().enumerate() {
            tx.set_channel(channel + 1, value).unwrap();
        }
        tx.start_with_period(Duration::from_millis(20));
        log.clear();

        tx.on_tick();
        tx.on_tick();

        assert_eq!(tx.tick_count(), 2);
        assert_eq!(universe.snapshot().as_slice(), &[0, 10, 20, 30, 40, 50]);

        let arm = Event::Arm {
            source: universe.base_address(),
            destination: QUEUE_ADDRESS,
            count: 6,
            start: true,
        };
        let cycle = [Event::Activate(true), Event::Restart, arm];
        assert_eq!(log.events(), [cycle, cycle].concat());
    }

    #[test]
    fn test_start_arms_timer_and_resets_count() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = transmitter(&universe, &ticks, &log);

        tx.start();
        tx.on_tick();
        tx.on_tick();
        tx.on_tick();
        assert_eq!(tx.tick_count(), 3);

        tx.start_with_period(Duration::from_millis(25));
        assert_eq!(tx.tick_count(), 0);
        assert_eq!(tx.period(), Duration::from_millis(25));
        assert_eq!(tx.state(), TransmitterState::Running);
        assert_eq!(log.count(&Event::TimerStart(Duration::from_millis(50))), 1);
        assert_eq!(log.count(&Event::TimerStart(Duration::from_millis(25))), 1);
    }

    #[test]
    fn test_pause_stops_and_ignores_late_ticks() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = transmitter(&universe, &ticks, &log);

        tx.start();
        tx.on_tick();
        log.clear();

        tx.pause();
        assert_eq!(tx.state(), TransmitterState::Paused);
        assert_eq!(log.events(), vec![Event::TimerCancel, Event::Activate(false)]);

        tx.on_tick();
        assert_eq!(tx.tick_count(), 1);
        assert!(log.arms().is_empty());

        universe.set(3, 99).unwrap();
        tx.start();
        tx.on_tick();
        assert_eq!(tx.tick_count(), 1);
        assert_eq!(tx.channel(3), Ok(99));
        assert_eq!(log.arms().len(), 1);
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = transmitter(&universe, &ticks, &log);
        log.clear();

        tx.on_tick();
        assert_eq!(tx.tick_count(), 0);
        assert!(log.events().is_empty());
    }

    #[test]
    fn test_sustained_soft_timer_rate() {
        let universe = Universe::full();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = DmxTransmitter::new(
            &TransmitterConfig::new(PIN),
            &universe,
            &ticks,
            MockEngine::new(&log),
            MockTransfer::new(&log),
            SoftTimer::new(),
        );

        tx.start_with_period(Duration::from_millis(50));
        let mut ticked = 0;
        for ms in 0..=1000 {
            if tx.service(Instant::from_millis(ms)) {
                ticked += 1;
            }
        }

        assert!((18..=22).contains(&tx.tick_count()));
        assert_eq!(tx.tick_count(), ticked);
    }

    #[test]
    fn test_soft_timer_paused_transmitter() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = DmxTransmitter::new(
            &TransmitterConfig::new(PIN),
            &universe,
            &ticks,
            MockEngine::new(&log),
            MockTransfer::new(&log),
            SoftTimer::new(),
        );

        tx.start();
        tx.service(Instant::from_millis(0));
        assert!(tx.service(Instant::from_millis(50)));
        tx.pause();
        assert!(!tx.timer().is_running());
        assert!(!tx.service(Instant::from_millis(100)));
        assert_eq!(tx.tick_count(), 1);
    }

    #[test]
    fn test_drop_releases_hardware() {
        let universe = Universe::new(5).unwrap();
        let ticks = FrameCounter::new();
        let log = Log::new();
        let mut tx = transmitter(&universe, &ticks, &log);
        tx.start();
        log.clear();

        drop(tx);

        assert_eq!(
            log.events(),
            vec![
                Event::TimerCancel,
                Event::Activate(false),
                Event::Abort,
                Event::Release,
            ]
        );
    }
}
