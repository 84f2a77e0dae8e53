//! Clock regression and epoch range handling

#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{allocator_on, zero_epoch_config};
    use crate::*;

    #[test]
    fn test_clock_backwards_fails_without_mutation() {
        let clock = ManualClock::new(10_000);
        let g = allocator_on(zero_epoch_config(), 1, 1, clock.clone());

        let first = g.generate().unwrap();
        clock.rewind(25);

        let err = g.generate().unwrap_err();
        assert_eq!(
            err,
            SnowflakeError::ClockMovedBackwards {
                last_timestamp: 10_000,
                now: 9_975,
                delta: 25,
            }
        );
        assert!(err.is_clock_regression());
        assert_eq!(g.last_timestamp(), Some(10_000));

        // Still behind: keeps failing, never clamps
        assert!(g.generate().is_err());
        assert!(g.generate_string().is_err());
        assert_eq!(g.last_timestamp(), Some(10_000));

        clock.set(10_000);
        let second = g.generate().unwrap();
        assert!(second > first);
        assert_eq!(g.decode(second).sequence, 1);
    }

    #[test]
    fn test_regression_keeps_sequence_progress() {
        let clock = ManualClock::new(7_000);
        let g = allocator_on(zero_epoch_config(), 2, 3, clock.clone());

        for _ in 0..3 {
            g.generate().unwrap();
        }
        clock.rewind(1);
        assert!(matches!(
            g.generate(),
            Err(SnowflakeError::ClockMovedBackwards { delta: 1, .. })
        ));

        clock.advance(1);
        let parts = g.decode(g.generate().unwrap());
        assert_eq!(parts.timestamp_ms, 7_000);
        assert_eq!(parts.sequence, 3);
    }

    #[test]
    fn test_no_regression_before_first_id() {
        let clock = ManualClock::new(500);
        let g = allocator_on(zero_epoch_config(), 0, 0, clock.clone());
        assert_eq!(g.last_timestamp(), None);

        clock.rewind(100);
        let parts = g.decode(g.generate().unwrap());
        assert_eq!(parts.timestamp_ms, 400);
        assert_eq!(g.last_timestamp(), Some(400));
    }

    #[test]
    fn test_clock_before_epoch_is_rejected() {
        let cfg = SnowflakeConfig::builder().epoch(1_000).build();
        let g = allocator_on(cfg, 0, 0, ManualClock::new(999));

        assert_eq!(
            g.generate(),
            Err(SnowflakeError::TimestampOutOfRange {
                timestamp: 999,
                epoch: 1_000,
                max: cfg.max_timestamp_offset(),
            })
        );
        assert_eq!(g.last_timestamp(), None);
    }

    #[test]
    fn test_clock_past_timestamp_field_is_rejected() {
        let cfg = zero_epoch_config();
        let clock = ManualClock::new(cfg.max_timestamp_offset());
        let g = allocator_on(cfg, 0, 0, clock.clone());

        let last_ok = g.decode(g.generate().unwrap());
        assert_eq!(last_ok.timestamp_ms, cfg.max_timestamp_offset());

        clock.advance(1);
        assert!(matches!(
            g.generate(),
            Err(SnowflakeError::TimestampOutOfRange { .. })
        ));
        assert_eq!(g.last_timestamp(), Some(cfg.max_timestamp_offset()));
    }

    #[test]
    fn test_real_clock_timestamp_matches_wall_clock() {
        let g = Snowflake::with_source(SnowflakeConfig::default(), &Explicit::new(0, 0));
        let before = unix_time_ms();
        let ts = g.decode(g.generate().unwrap()).timestamp_ms;
        let after = unix_time_ms();
        assert!(before <= ts && ts <= after, "{before} <= {ts} <= {after}");
    }
}
