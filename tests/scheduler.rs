mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_ambilight::scheduler::{DEFAULT_MOTION_PERIOD, DEFAULT_SAMPLE_PERIOD, TickScheduler};

    #[test]
    fn test_default_periods() {
        assert_eq!(DEFAULT_SAMPLE_PERIOD, Duration::from_millis(16));
        assert_eq!(DEFAULT_MOTION_PERIOD, Duration::from_millis(16));
    }

    #[test]
    fn test_fast_work_sleeps_the_rest_of_the_period() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(10));

        let first = scheduler.tick(Instant::from_millis(0));
        assert_eq!(first.next_deadline, Instant::from_millis(10));
        assert_eq!(first.sleep_duration, Duration::from_millis(10));

        let second = scheduler.tick(Instant::from_millis(13));
        assert_eq!(second.next_deadline, Instant::from_millis(20));
        assert_eq!(second.sleep_duration, Duration::from_millis(7));
    }

    #[test]
    fn test_late_tick_does_not_sleep() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(10));
        scheduler.tick(Instant::from_millis(0));

        let late = scheduler.tick(Instant::from_millis(25));
        assert_eq!(late.next_deadline, Instant::from_millis(20));
        assert_eq!(late.sleep_duration, Duration::from_millis(0));
    }

    #[test]
    fn test_stall_drops_backlog() {
        let mut scheduler = TickScheduler::new(Duration::from_millis(10));
        scheduler.tick(Instant::from_millis(0));

        let result = scheduler.tick(Instant::from_millis(500));
        assert_eq!(result.next_deadline, Instant::from_millis(510));
        assert_eq!(result.sleep_duration, Duration::from_millis(10));
        assert_eq!(scheduler.period(), Duration::from_millis(10));
    }
}
