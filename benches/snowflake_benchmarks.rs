use criterion::{criterion_group, criterion_main, Criterion};
use snowflake_alloc::{Explicit, Snowflake, SnowflakeConfig};
use std::hint::black_box;
use std::sync::Arc;

pub fn sequence_bits_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sequence Bits Comparison");

    // Fewer sequence bits means the allocator waits for the next millisecond sooner
    for &sequence_bits in &[4u8, 8, 10, 12] {
        let config = SnowflakeConfig::builder()
            .sequence_bits(sequence_bits)
            .expect("valid sequence bits")
            .build();

        group.bench_function(
            format!("seq_bits_{}_per_ms_{}", sequence_bits, 1u32 << sequence_bits),
            |b| {
                let generator = Snowflake::with_source(config, &Explicit::new(1, 1));
                b.iter(|| {
                    black_box(generator.generate().expect("clock moved backwards"));
                });
            },
        );
    }

    group.finish();
}

pub fn decode_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Decode");
    let generator = Snowflake::with_source(SnowflakeConfig::default(), &Explicit::new(1, 1));
    let id = generator.generate().expect("clock moved backwards");

    group.bench_function("decode", |b| {
        b.iter(|| {
            black_box(generator.decode(black_box(id)));
        });
    });

    group.bench_function("generate_string", |b| {
        b.iter(|| {
            black_box(generator.generate_string().expect("clock moved backwards"));
        });
    });

    group.finish();
}

pub fn concurrent_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Concurrent");

    for &thread_count in &[2, 4, 8] {
        group.bench_function(format!("threads/{}", thread_count), |b| {
            let generator = Arc::new(Snowflake::with_source(
                SnowflakeConfig::default(),
                &Explicit::new(1, 1),
            ));
            b.iter(|| {
                let mut handles = Vec::with_capacity(thread_count);

                for _ in 0..thread_count {
                    let generator = Arc::clone(&generator);
                    handles.push(std::thread::spawn(move || {
                        for _ in 0..100 {
                            black_box(generator.generate().expect("clock moved backwards"));
                        }
                    }));
                }

                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    sequence_bits_comparison,
    concurrent_benchmarks,
    decode_benchmarks
);
criterion_main!(benches);
