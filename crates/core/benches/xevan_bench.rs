//! Benchmark for the Xevan cascade

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xevan_core::{
    CASCADE_ORDER, DigestEngine, INPUT_SIZE, Work, XevanHash, regen_hashes, rust_crypto_engine,
};

fn bench_hash(c: &mut Criterion) {
    let Ok(mut hasher) = XevanHash::new() else {
        eprintln!("xevan_single: skipped, build with --features native");
        return;
    };
    let header = [0x5au8; INPUT_SIZE];

    c.bench_function("xevan_single", |b| {
        b.iter(|| hasher.hash(black_box(&header)))
    });
}

fn bench_hash_varying_nonce(c: &mut Criterion) {
    let Ok(mut hasher) = XevanHash::new() else {
        return;
    };

    c.bench_function("xevan_varying", |b| {
        let mut work = Work::new([0u8; INPUT_SIZE]);
        let mut nonce: u32 = 0;
        b.iter(|| {
            work.set_nonce(nonce);
            nonce = nonce.wrapping_add(1);
            hasher.hash(black_box(work.header()))
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    if XevanHash::new().is_err() {
        return;
    }
    let mut works: Vec<Work> = (0..256u32)
        .map(|nonce| {
            let mut w = Work::new([0u8; INPUT_SIZE]);
            w.set_nonce(nonce);
            w
        })
        .collect();

    c.bench_function("xevan_batch_256", |b| {
        b.iter(|| regen_hashes(black_box(&mut works)))
    });
}

fn bench_rust_crypto_engines(c: &mut Criterion) {
    let data = [1u8; 128];
    for primitive in CASCADE_ORDER {
        let Some(template) = rust_crypto_engine(primitive) else {
            continue;
        };
        let mut out = vec![0u8; primitive.output_size()];
        c.bench_function(&format!("engine_{}", primitive.name()), |b| {
            b.iter(|| {
                let mut engine = template.box_clone();
                let _ = engine.absorb(black_box(&data));
                let _ = engine.finalize_into(&mut out);
            })
        });
    }
}

criterion_group!(
    benches,
    bench_hash,
    bench_hash_varying_nonce,
    bench_batch,
    bench_rust_crypto_engines
);
criterion_main!(benches);
