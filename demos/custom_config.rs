use snowflake_alloc::{Chain, Environment, Random, Snowflake, SnowflakeConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fewer sequence bits leave more room for the timestamp
    let config = SnowflakeConfig::builder()
        .epoch(1704067200000) // 2024-01-01
        .sequence_bits(10)?
        .spin_yield_every(8)
        .build();

    // SNOWFLAKE_WORKER_ID / SNOWFLAKE_DATACENTER_ID if set, random otherwise
    let source = Chain::new().then(Environment::default()).then(Random);
    let generator = Snowflake::with_source(config, &source);

    println!("Generator configuration:");
    println!("  Timestamp bits: {}", config.timestamp_bits());
    println!("  Datacenter bits: {}", config.datacenter_bits());
    println!("  Worker bits: {}", config.worker_bits());
    println!("  Sequence bits: {}", config.sequence_bits());
    println!("  Max sequence per ms: {}", config.max_sequence());

    let id = generator.generate()?;
    let parts = generator.decode(id);

    println!("\nGenerated ID: {}", id);
    println!("Components:");
    println!("  Timestamp: {} ms since Unix epoch", parts.timestamp_ms);
    println!("  Datacenter ID: {} (of {})", parts.datacenter_id, config.max_datacenter_id());
    println!("  Worker ID: {} (of {})", parts.worker_id, config.max_worker_id());
    println!("  Sequence: {} (of {})", parts.sequence, config.max_sequence());
    Ok(())
}
