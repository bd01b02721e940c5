//! Cipher benchmarks.
//!
//! Run with: cargo bench -p parfish-crypto

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parfish_types::CipherDirection;

const BULK_SIZES: [usize; 3] = [1024, 16384, 1048576];

fn word_buffer(bytes: usize) -> Vec<u32> {
    (0..(bytes / 4) as u32).map(|i| i.wrapping_mul(0x9e37_79b9)).collect()
}

// ---------------------------------------------------------------------------
// Key schedule benchmarks
// ---------------------------------------------------------------------------

fn bench_key_setup(c: &mut Criterion) {
    use parfish_crypto::blowfish::BlowfishKey;
    use parfish_crypto::rc5::Rc5Key;

    let mut group = c.benchmark_group("key-setup");

    for key_len in [8usize, 16, 56] {
        let key: Vec<u8> = (0..key_len).map(|i| i as u8).collect();
        group.bench_with_input(BenchmarkId::new("blowfish", key_len), &key, |b, key| {
            b.iter(|| BlowfishKey::new(key).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("rc5-32/12", key_len), &key, |b, key| {
            b.iter(|| Rc5Key::new(key, Rc5Key::DEFAULT_ROUNDS).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Bulk benchmarks
// ---------------------------------------------------------------------------

fn bench_blowfish_bulk(c: &mut Criterion) {
    use parfish_crypto::blowfish::BlowfishKey;
    use parfish_crypto::bulk::{process_buffer, BulkProcessor};

    let key = BlowfishKey::new(b"TESTKEY").unwrap();
    let single = BulkProcessor::with_threads(1).unwrap();
    let mut group = c.benchmark_group("blowfish-ecb");

    for size in BULK_SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let mut buffer = word_buffer(size);

        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| process_buffer(&key, &mut buffer, CipherDirection::Encrypt).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("single-thread", size), &size, |b, _| {
            b.iter(|| {
                single
                    .process(&key, &mut buffer, CipherDirection::Encrypt)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_rc5_bulk(c: &mut Criterion) {
    use parfish_crypto::bulk::process_buffer;
    use parfish_crypto::rc5::Rc5Key;

    let key = Rc5Key::new(&[0u8; 16], Rc5Key::DEFAULT_ROUNDS).unwrap();
    let mut group = c.benchmark_group("rc5-32-12-ecb");

    for size in BULK_SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let mut buffer = word_buffer(size);

        group.bench_with_input(BenchmarkId::new("encrypt", size), &size, |b, _| {
            b.iter(|| process_buffer(&key, &mut buffer, CipherDirection::Encrypt).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("decrypt", size), &size, |b, _| {
            b.iter(|| process_buffer(&key, &mut buffer, CipherDirection::Decrypt).unwrap());
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Toy RSA benchmarks
// ---------------------------------------------------------------------------

fn bench_toy_rsa(c: &mut Criterion) {
    use parfish_crypto::toy_rsa::ToyRsaKey;

    let key = ToyRsaKey::demo();
    let mut group = c.benchmark_group("toy-rsa");

    for size in [256usize, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        let message: Vec<u8> = (0..size).map(|i| i as u8).collect();
        let ciphertext = key.encrypt(&message);

        group.bench_with_input(BenchmarkId::new("encrypt", size), &size, |b, _| {
            b.iter(|| key.encrypt(&message));
        });

        group.bench_with_input(BenchmarkId::new("decrypt", size), &size, |b, _| {
            b.iter(|| key.decrypt(&ciphertext).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_key_setup,
    bench_blowfish_bulk,
    bench_rc5_bulk,
    bench_toy_rsa
);
criterion_main!(benches);
