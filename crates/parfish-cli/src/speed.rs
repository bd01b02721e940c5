//! Bulk throughput benchmark for the block ciphers.

use parfish_crypto::blowfish::BlowfishKey;
use parfish_crypto::bulk::{BulkProcessor, WORDS_PER_BLOCK, WORD_SIZE};
use parfish_crypto::provider::BlockCipher;
use parfish_crypto::rc5::Rc5Key;
use parfish_types::{CipherAlgId, CipherDirection};
use std::time::{Duration, Instant};

const BLOCK_BYTES: usize = WORDS_PER_BLOCK * WORD_SIZE;

pub fn run(
    algorithm: &str,
    size: usize,
    seconds: u64,
    threads: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let algorithms: Vec<CipherAlgId> = if algorithm.eq_ignore_ascii_case("all") {
        CipherAlgId::ALL.to_vec()
    } else {
        vec![algorithm
            .parse::<CipherAlgId>()
            .map_err(|_| format!("unknown algorithm: {algorithm} (valid: blowfish, rc5, all)"))?]
    };

    let processor = match threads {
        Some(n) => BulkProcessor::with_threads(n)?,
        None => BulkProcessor::new(),
    };
    let duration = Duration::from_secs(seconds);
    log::info!(
        "{} threads, {seconds}s per cipher",
        processor.num_threads()
    );

    for alg in algorithms {
        let block_bytes = alg.block_size();
        if size < block_bytes {
            return Err(format!("size must be at least {block_bytes} bytes for {alg}").into());
        }
        log::info!("{alg}: {} bytes per pass", size - size % block_bytes);
        match alg {
            CipherAlgId::BlowfishEcb => {
                let key = BlowfishKey::new(b"TESTKEY")?;
                bench_bulk("Blowfish-ECB", &key, &processor, size, duration)?;
            }
            CipherAlgId::Rc5_32Ecb => {
                let key = Rc5Key::new(&[0x42u8; 16], Rc5Key::DEFAULT_ROUNDS)?;
                bench_bulk("RC5-32/12/16-ECB", &key, &processor, size, duration)?;
            }
        }
    }
    Ok(())
}

/// Repeat encryption passes over a `size`-byte buffer for `duration`.
///
/// Always runs at least one pass.
fn bench_bulk<C: BlockCipher>(
    name: &str,
    cipher: &C,
    processor: &BulkProcessor,
    size: usize,
    duration: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buffer = vec![0u32; size / BLOCK_BYTES * WORDS_PER_BLOCK];

    let start = Instant::now();
    let mut total_bytes: u64 = 0;
    let mut ops: u64 = 0;

    loop {
        let report = processor.process(cipher, &mut buffer, CipherDirection::Encrypt)?;
        total_bytes += report.bytes() as u64;
        ops += 1;
        if start.elapsed() >= duration {
            break;
        }
    }

    let elapsed = start.elapsed().as_secs_f64();
    let mb_per_sec = if elapsed > 0.0 {
        total_bytes as f64 / (1024.0 * 1024.0) / elapsed
    } else {
        0.0
    };
    println!("{name:24} {mb_per_sec:10.2} MB/s  ({ops} ops in {elapsed:.2}s)");
    Ok(())
}
