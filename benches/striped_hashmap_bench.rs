use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use striped_hashmap::StripedHashMap;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_put(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
    c.bench_function("striped_hashmap_put_10k", |b| {
        b.iter_batched(
            || StripedHashMap::new(4096),
            |m| {
                for (i, k) in keys.iter().enumerate() {
                    m.put(k, i as u32);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("striped_hashmap_get_hit", |b| {
        let m = StripedHashMap::new(4096);
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            m.put(k, i as u32);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("striped_hashmap_get_miss", |b| {
        let m = StripedHashMap::new(4096);
        for (i, x) in lcg(11).take(10_000).enumerate() {
            m.put(&key(x), i as u32);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in map
            let k = key(miss.next().unwrap());
            black_box(m.try_get(&k));
        })
    });
}

// Fixed thread count, varying bucket count: capacity 1 is a single global
// lock, larger capacities spread the same work across stripes.
fn bench_parallel_put(c: &mut Criterion) {
    const THREADS: u64 = 4;
    const PER_THREAD: u64 = 5_000;
    let keys: Arc<Vec<Vec<String>>> = Arc::new(
        (0..THREADS)
            .map(|t| lcg(t + 100).take(PER_THREAD as usize).map(key).collect())
            .collect(),
    );

    let mut group = c.benchmark_group("striped_hashmap_parallel_put");
    for capacity in [1usize, 16, 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            b.iter(|| {
                let m = Arc::new(StripedHashMap::new(cap));
                let handles: Vec<_> = (0..THREADS as usize)
                    .map(|t| {
                        let m = Arc::clone(&m);
                        let keys = Arc::clone(&keys);
                        thread::spawn(move || {
                            for (i, k) in keys[t].iter().enumerate() {
                                m.put(k, i as u32);
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    h.join().unwrap();
                }
                black_box(m)
            })
        });
    }
    group.finish();
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_put, bench_get_hit, bench_get_miss, bench_parallel_put
}
criterion_main!(benches);
