#[cfg(test)]
mod tests {
    use crate::tests::test_utils::{
        allocator_on, assert_ids_monotonic, assert_unique_and_monotonic, zero_epoch_config,
    };
    use crate::*;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn test_concurrent_generation() {
        let generator = Arc::new(Snowflake::with_source(
            SnowflakeConfig::default(),
            &Explicit::new(7, 1),
        ));
        let num_threads = 8;
        let ids_per_thread = 500;
        let mut handles = Vec::with_capacity(num_threads);

        for _ in 0..num_threads {
            let generator_clone = Arc::clone(&generator);
            handles.push(thread::spawn(move || {
                let mut v = Vec::with_capacity(ids_per_thread);
                for _ in 0..ids_per_thread {
                    v.push(generator_clone.generate().unwrap());
                }
                v
            }));
        }

        let mut all_ids = Vec::with_capacity(num_threads * ids_per_thread);
        for h in handles {
            let ids = h.join().expect("thread panicked");
            // Each caller observes its own IDs in increasing order
            assert_ids_monotonic(&ids);
            all_ids.extend(ids);
        }

        assert_unique_and_monotonic(all_ids, num_threads * ids_per_thread);
    }

    #[test]
    fn test_high_contention_within_one_millisecond() {
        let g = Arc::new(allocator_on(
            zero_epoch_config(),
            1,
            1,
            ManualClock::new(123_456),
        ));
        let barrier = Arc::new(Barrier::new(4));
        let mut handles = vec![];

        for _ in 0..4 {
            let g = Arc::clone(&g);
            let b = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                b.wait(); // Sync start
                (0..1_000)
                    .map(|_| g.generate().unwrap())
                    .collect::<Vec<_>>()
            }));
        }

        let mut all_ids = vec![];
        for h in handles {
            all_ids.extend(h.join().unwrap());
        }

        // Every sequence slot of the frozen millisecond is claimed exactly once
        let seqs: HashSet<u16> = all_ids.iter().map(|id| g.decode(*id).sequence).collect();
        assert_eq!(seqs.len(), 4_000);
        assert!(seqs.iter().all(|s| *s < 4_000));
        assert_unique_and_monotonic(all_ids, 4_000);
    }

    #[test]
    fn test_clock_regression_seen_by_all_threads() {
        let clock = ManualClock::new(50_000);
        let g = Arc::new(allocator_on(zero_epoch_config(), 0, 0, clock.clone()));
        g.generate().unwrap();
        clock.rewind(3);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let g = Arc::clone(&g);
                thread::spawn(move || g.generate())
            })
            .collect();

        for h in handles {
            assert!(h.join().unwrap().unwrap_err().is_clock_regression());
        }
        assert_eq!(g.last_timestamp(), Some(50_000));
    }
}
