use snowflake_alloc::Snowflake;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Node identity derived from this host, random where that fails
    let generator = Snowflake::new();
    let node = generator.node();
    println!(
        "Node: worker {} / datacenter {}",
        node.worker_id(),
        node.datacenter_id()
    );

    println!("Generated IDs (guaranteed to be increasing):");
    for _ in 0..3 {
        let id = generator.generate()?;
        print_id(id, &generator);
    }

    println!("\nAs a string: {}", generator.generate_string()?);
    Ok(())
}

fn print_id(id: u64, generator: &Snowflake) {
    let parts = generator.decode(id);
    let datetime = parts
        .datetime()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| "out of range".to_owned());

    println!(
        "  ID: {id}, Timestamp: {}, Human date: {datetime}, Datacenter: {}, Worker: {}, Sequence: {}",
        parts.timestamp_ms, parts.datacenter_id, parts.worker_id, parts.sequence
    );
}
