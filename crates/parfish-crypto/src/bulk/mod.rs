//! Data-parallel bulk encryption over an in-memory word buffer.
//!
//! A buffer of N words holds N/2 independent blocks. The buffer is split
//! into disjoint two-word chunks and handed to rayon workers; every worker
//! reads the shared key schedule through `&C` and writes only its own chunk.
//! Block i always lands back at position i, in whatever order blocks finish.

use crate::provider::BlockCipher;
use parfish_types::{CipherDirection, CryptoError};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Words per 64-bit block.
pub const WORDS_PER_BLOCK: usize = 2;

/// Size of one buffer word in bytes.
pub const WORD_SIZE: usize = std::mem::size_of::<u32>();

/// Timing of one bulk pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulkReport {
    elapsed: Duration,
    bytes: usize,
}

impl BulkReport {
    /// Wall-clock duration of the whole pass, including the final join.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Number of bytes transformed (words x 4).
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Throughput in bytes per second; 0.0 when no time was measured.
    pub fn bytes_per_sec(&self) -> f64 {
        let secs = self.elapsed_secs();
        if secs > 0.0 {
            self.bytes as f64 / secs
        } else {
            0.0
        }
    }
}

/// Runs bulk passes on either the global rayon pool or a dedicated one.
#[derive(Debug, Default)]
pub struct BulkProcessor {
    pool: Option<rayon::ThreadPool>,
}

impl BulkProcessor {
    /// A processor that uses rayon's global pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// A processor with its own pool of `threads` workers.
    ///
    /// `threads == 0` lets rayon pick (one per logical CPU, or
    /// `RAYON_NUM_THREADS`).
    pub fn with_threads(threads: usize) -> Result<Self, CryptoError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("parfish-worker-{i}"))
            .build()
            .map_err(|e| CryptoError::WorkerPool(e.to_string()))?;
        Ok(BulkProcessor { pool: Some(pool) })
    }

    /// Number of worker threads a pass will use.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Transform every block of `buffer` in place and time the pass.
    ///
    /// The word count is validated before any block is touched; an odd count
    /// fails with [`CryptoError::InvalidBufferLength`].
    pub fn process<C>(
        &self,
        cipher: &C,
        buffer: &mut [u32],
        direction: CipherDirection,
    ) -> Result<BulkReport, CryptoError>
    where
        C: BlockCipher + ?Sized,
    {
        if buffer.len() % WORDS_PER_BLOCK != 0 {
            return Err(CryptoError::InvalidBufferLength {
                words: buffer.len(),
            });
        }

        let bytes = buffer.len() * WORD_SIZE;
        let start = Instant::now();
        match &self.pool {
            Some(pool) => pool.install(|| transform_blocks(cipher, buffer, direction)),
            None => transform_blocks(cipher, buffer, direction),
        }
        let elapsed = start.elapsed();

        Ok(BulkReport { elapsed, bytes })
    }
}

/// Transform `buffer` on the global pool; see [`BulkProcessor::process`].
pub fn process_buffer<C>(
    cipher: &C,
    buffer: &mut [u32],
    direction: CipherDirection,
) -> Result<BulkReport, CryptoError>
where
    C: BlockCipher + ?Sized,
{
    BulkProcessor::new().process(cipher, buffer, direction)
}

fn transform_blocks<C>(cipher: &C, buffer: &mut [u32], direction: CipherDirection)
where
    C: BlockCipher + ?Sized,
{
    buffer
        .par_chunks_exact_mut(WORDS_PER_BLOCK)
        .for_each(|block| {
            let (left, right) = cipher.transform_words(direction, block[0], block[1]);
            block[0] = left;
            block[1] = right;
        });
}
