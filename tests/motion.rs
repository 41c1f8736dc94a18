mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_ambilight::color::Rgb;
    use myrtio_ambilight::easing::{Easing, EasingMode};
    use myrtio_ambilight::motion::{
        EasedMotion, FixedStepMotion, Motion, MotionModel, MotionPolicy, PolicyKind,
    };

    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    fn ms(value: u64) -> Instant {
        Instant::from_millis(value)
    }

    #[test]
    fn test_fixed_step_linear_sequence() {
        let mut motion = FixedStepMotion::new(5, BLACK);
        motion.retarget(Rgb { r: 100, g: 0, b: 0 }, ms(0));

        let sequence: Vec<Rgb> = (1..=5).map(|i| motion.advance(ms(i * 16)).to_rgb()).collect();
        assert_eq!(
            sequence,
            [20, 40, 60, 80, 100].map(|r| Rgb { r, g: 0, b: 0 })
        );
        assert!(motion.is_settled());
        assert_eq!(motion.remaining(), 0);

        // Settled motion holds its color
        assert_eq!(motion.advance(ms(200)).to_rgb(), Rgb { r: 100, g: 0, b: 0 });
    }

    #[test]
    fn test_fixed_step_lands_exactly_on_target() {
        let target = Rgb { r: 7, g: 254, b: 33 };
        let mut motion = FixedStepMotion::new(3, Rgb { r: 200, g: 1, b: 100 });
        motion.retarget(target, ms(0));

        let mut last = BLACK;
        for i in 0..3 {
            last = motion.advance(ms(i)).to_rgb();
        }
        assert_eq!(last, target);
    }

    #[test]
    fn test_fixed_step_retarget_starts_from_present_color() {
        let mut motion = FixedStepMotion::new(4, BLACK);
        motion.retarget(Rgb { r: 100, g: 0, b: 0 }, ms(0));
        motion.advance(ms(16));
        motion.advance(ms(32));
        assert_eq!(motion.current().to_rgb(), Rgb { r: 50, g: 0, b: 0 });

        motion.retarget(Rgb { r: 10, g: 0, b: 0 }, ms(40));
        assert_eq!(motion.remaining(), 4);
        assert_eq!(motion.advance(ms(48)).to_rgb(), Rgb { r: 40, g: 0, b: 0 });
    }

    #[test]
    fn test_fixed_step_zero_steps_jumps() {
        let mut motion = FixedStepMotion::new(0, BLACK);
        motion.retarget(Rgb { r: 9, g: 8, b: 7 }, ms(0));
        assert_eq!(motion.current().to_rgb(), Rgb { r: 9, g: 8, b: 7 });
        assert!(motion.is_settled());
    }

    #[test]
    fn test_eased_converges_to_target() {
        let mut motion = EasedMotion::new(
            Duration::from_millis(500),
            Easing::Quad,
            EasingMode::InOut,
            BLACK,
        );
        motion.retarget(Rgb { r: 255, g: 0, b: 0 }, ms(0));
        assert!(!motion.is_settled());

        let mut previous = 0;
        for t in (16..=512).step_by(16) {
            let current = motion.advance(ms(t)).to_rgb();
            assert!(current.r >= previous, "red went back at {t} ms");
            assert_eq!((current.g, current.b), (0, 0));
            previous = current.r;
        }
        assert_eq!(motion.current().to_rgb(), Rgb { r: 255, g: 0, b: 0 });
        assert!(motion.is_settled());
    }

    #[test]
    fn test_eased_retarget_mid_animation() {
        let mut motion = EasedMotion::new(
            Duration::from_millis(100),
            Easing::Linear,
            EasingMode::InOut,
            BLACK,
        );
        motion.retarget(Rgb { r: 100, g: 0, b: 0 }, ms(0));
        motion.advance(ms(50));
        assert_eq!(motion.current().to_rgb(), Rgb { r: 50, g: 0, b: 0 });

        motion.retarget(Rgb { r: 200, g: 0, b: 0 }, ms(50));
        let red = &motion.tweens()[0];
        assert!((red.start() - 50.0).abs() < 1e-3);
        assert_eq!(red.end(), 200.0);
        assert_eq!(motion.current().to_rgb(), Rgb { r: 50, g: 0, b: 0 });

        motion.advance(ms(100));
        assert_eq!(motion.current().to_rgb(), Rgb { r: 125, g: 0, b: 0 });
        motion.advance(ms(150));
        assert_eq!(motion.current().to_rgb(), Rgb { r: 200, g: 0, b: 0 });
    }

    #[test]
    fn test_eased_retarget_uses_time_since_last_advance() {
        let mut motion = EasedMotion::new(
            Duration::from_millis(100),
            Easing::Linear,
            EasingMode::InOut,
            BLACK,
        );
        motion.retarget(Rgb { r: 100, g: 0, b: 0 }, ms(0));
        motion.advance(ms(10));

        // No advance between 10 and 80 ms; the restart point is the value at 80 ms
        motion.retarget(Rgb { r: 0, g: 0, b: 0 }, ms(80));
        assert!((motion.tweens()[0].start() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn test_motion_slot_follows_policy() {
        let fixed = Motion::new(MotionPolicy::FixedStep { steps: 3 }, BLACK);
        assert!(matches!(fixed, Motion::FixedStep(_)));

        let eased = Motion::new(MotionPolicy::default(), BLACK);
        assert!(matches!(eased, Motion::Eased(_)));
        assert!(eased.is_settled());

        let mut motion = Motion::new(MotionPolicy::FixedStep { steps: 2 }, BLACK);
        motion.retarget(Rgb { r: 0, g: 0, b: 200 }, ms(0));
        assert_eq!(motion.advance(ms(1)).to_rgb(), Rgb { r: 0, g: 0, b: 100 });
        assert_eq!(motion.advance(ms(2)).to_rgb(), Rgb { r: 0, g: 0, b: 200 });
    }

    #[test]
    fn test_policy_kind_names() {
        assert_eq!("fixed-step".parse::<PolicyKind>(), Ok(PolicyKind::FixedStep));
        assert_eq!("Linear".parse::<PolicyKind>(), Ok(PolicyKind::FixedStep));
        assert_eq!("eased".parse::<PolicyKind>(), Ok(PolicyKind::Eased));
        assert!("bouncy".parse::<PolicyKind>().is_err());
        assert_eq!(PolicyKind::FixedStep.as_str(), "fixed-step");
    }
}
