mod support;

mod tests {
    use embassy_time::Duration;
    use image::RgbImage;
    use myrtio_ambilight::color::Rgb;
    use myrtio_ambilight::config::Resolution;
    use myrtio_ambilight::error::{CaptureError, SampleError};
    use myrtio_ambilight::sampler::{FrameSampler, SampleOutcome, accepts, average_color};
    use myrtio_ambilight::state::SharedColorState;

    use crate::support::{BrokenScreen, FrozenScreen, SolidScreen, rgb, solid_frame};

    fn sampler(threshold: u8) -> FrameSampler {
        FrameSampler::new(Resolution::new(4, 4), threshold, Duration::from_millis(100))
    }

    #[test]
    fn test_average_color_truncates() {
        let mut frame = solid_frame(rgb(0, 0, 0), 2, 1);
        frame.put_pixel(0, 0, image::Rgb([255, 3, 10]));
        frame.put_pixel(1, 0, image::Rgb([0, 0, 11]));

        assert_eq!(average_color(&frame), Some(rgb(127, 1, 10)));
        assert_eq!(average_color(&RgbImage::new(0, 0)), None);
    }

    #[test]
    fn test_sample_solid_frame() {
        let frame = solid_frame(rgb(200, 100, 50), 4, 4);
        assert_eq!(sampler(10).sample(&frame), Ok(rgb(200, 100, 50)));
    }

    #[test]
    fn test_sample_downsamples_large_frame() {
        let frame = solid_frame(rgb(200, 100, 50), 640, 360);
        let color = sampler(10).sample(&frame).unwrap();
        assert!(color.r.abs_diff(200) <= 1);
        assert!(color.g.abs_diff(100) <= 1);
        assert!(color.b.abs_diff(50) <= 1);
    }

    #[test]
    fn test_sample_split_screen() {
        let mut frame = solid_frame(rgb(0, 0, 0), 4, 4);
        for y in 0..4 {
            for x in 0..2 {
                frame.put_pixel(x, y, image::Rgb([255, 255, 255]));
            }
        }
        assert_eq!(sampler(10).sample(&frame), Ok(rgb(127, 127, 127)));
    }

    #[test]
    fn test_sample_empty_frame() {
        assert_eq!(
            sampler(10).sample(&RgbImage::new(0, 10)),
            Err(SampleError::EmptyFrame)
        );
    }

    #[test]
    fn test_accepts_uses_max_channel_difference() {
        let published = rgb(100, 100, 100);
        assert!(!accepts(rgb(105, 100, 100), published, 10));
        assert!(!accepts(rgb(110, 90, 100), published, 10));
        assert!(accepts(rgb(111, 100, 100), published, 10));
        assert!(accepts(rgb(100, 100, 89), published, 10));
    }

    #[tokio::test]
    async fn test_tick_publishes_big_change() {
        let state = SharedColorState::new(rgb(0, 0, 0));
        let mut screen = SolidScreen::new(rgb(255, 0, 0), 4, 4);

        let outcome = sampler(10).tick(&mut screen, &state).await;
        assert_eq!(outcome, Ok(SampleOutcome::Published(rgb(255, 0, 0))));
        assert_eq!(state.target(), rgb(255, 0, 0));
        assert_eq!(state.snapshot().revision, 1);
    }

    #[tokio::test]
    async fn test_tick_suppresses_small_change() {
        let state = SharedColorState::new(rgb(100, 100, 100));
        let mut screen = SolidScreen::new(rgb(105, 100, 100), 4, 4);

        let outcome = sampler(10).tick(&mut screen, &state).await;
        assert_eq!(outcome, Ok(SampleOutcome::Suppressed(rgb(105, 100, 100))));
        let snapshot = state.snapshot();
        assert_eq!(snapshot.target, rgb(100, 100, 100));
        assert_eq!(snapshot.current, rgb(100, 100, 100));
        assert_eq!(snapshot.revision, 0);
    }

    #[tokio::test]
    async fn test_tick_compares_against_published_target() {
        let state = SharedColorState::new(rgb(0, 0, 0));
        let screen = SolidScreen::new(rgb(200, 100, 50), 4, 4);
        let sampler = sampler(10);

        let mut source = screen.clone();
        sampler.tick(&mut source, &state).await.unwrap();

        // Slow drift is measured against the last accepted color
        screen.show(rgb(208, 100, 50));
        assert!(matches!(
            sampler.tick(&mut source, &state).await,
            Ok(SampleOutcome::Suppressed(_))
        ));
        screen.show(rgb(215, 100, 50));
        assert_eq!(
            sampler.tick(&mut source, &state).await,
            Ok(SampleOutcome::Published(rgb(215, 100, 50)))
        );
        assert_eq!(state.snapshot().revision, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_times_out() {
        let state = SharedColorState::new(rgb(1, 2, 3));
        let outcome = sampler(0).tick(&mut FrozenScreen, &state).await;
        assert_eq!(outcome, Err(SampleError::Capture(CaptureError::Timeout)));
        assert_eq!(state.target(), rgb(1, 2, 3));
    }

    #[tokio::test]
    async fn test_tick_capture_failure_publishes_nothing() {
        let state = SharedColorState::new(rgb(1, 2, 3));
        let outcome = sampler(0).tick(&mut BrokenScreen, &state).await;
        assert!(matches!(
            outcome,
            Err(SampleError::Capture(CaptureError::Unavailable(_)))
        ));
        assert_eq!(state.snapshot().revision, 0);
    }

    #[test]
    fn test_default_resolution_is_accepted() {
        let frame = solid_frame(Rgb { r: 9, g: 9, b: 9 }, 64, 64);
        let sampler = FrameSampler::new(
            myrtio_ambilight::config::DEFAULT_RESOLUTION,
            10,
            Duration::from_millis(100),
        );
        assert_eq!(sampler.sample(&frame), Ok(rgb(9, 9, 9)));
        assert_eq!(sampler.threshold(), 10);
    }
}
