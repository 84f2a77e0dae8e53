use rand::{rng, Rng};
use snowflake_alloc::{Explicit, Snowflake, SnowflakeConfig};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() {
    // Two allocators standing in for two nodes, each shared by several threads
    let nodes = [
        Arc::new(Snowflake::with_source(SnowflakeConfig::default(), &Explicit::new(1, 1))),
        Arc::new(Snowflake::with_source(SnowflakeConfig::default(), &Explicit::new(2, 1))),
    ];
    let mut handles = vec![];

    for thread_id in 0..4 {
        let generator = Arc::clone(&nodes[thread_id % nodes.len()]);
        handles.push(thread::spawn(move || {
            let mut ids = Vec::new();
            let mut rng = rng();

            for i in 0..5 {
                let id = match generator.generate() {
                    Ok(id) => id,
                    Err(err) => {
                        eprintln!("Thread {thread_id} stopped: {err}");
                        break;
                    }
                };
                let parts = generator.decode(id);

                println!(
                    "Thread {} generated ID {} (ts={}, dc={}, worker={}, seq={})",
                    thread_id, i, parts.timestamp_ms, parts.datacenter_id, parts.worker_id, parts.sequence
                );
                ids.push(id);

                // Random delay to simulate work
                let delay = rng.random_range(0..=9);
                thread::sleep(Duration::from_millis(delay));
            }
            ids
        }));
    }

    let mut all_ids = HashSet::new();
    let mut total = 0;
    for handle in handles {
        let thread_ids = handle.join().expect("worker thread panicked");
        total += thread_ids.len();
        all_ids.extend(thread_ids);
    }

    println!("\nTotal IDs generated: {}", total);
    assert_eq!(all_ids.len(), total, "Duplicate ID generated!");
    println!("All IDs are unique across both nodes!");
}
