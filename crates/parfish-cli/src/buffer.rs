//! File bytes as a buffer of little-endian `u32` words.
//!
//! Only whole 64-bit blocks are kept; a trailing partial block is ignored.

use parfish_crypto::bulk::{WORDS_PER_BLOCK, WORD_SIZE};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read};
use std::path::Path;

const BLOCK_BYTES: usize = WORDS_PER_BLOCK * WORD_SIZE;

/// Reinterpret `bytes` as words, dropping any trailing partial block.
pub fn words_from_bytes(bytes: &[u8]) -> Vec<u32> {
    let usable = bytes.len() - bytes.len() % BLOCK_BYTES;
    bytes[..usable]
        .chunks_exact(WORD_SIZE)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

pub fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Read a file (or stdin for `-`) into a word buffer.
pub fn read_words(file: &str) -> Result<Vec<u32>, Box<dyn std::error::Error>> {
    if file != "-" {
        return read_file_words(Path::new(file));
    }
    let mut data = Vec::new();
    io::stdin().read_to_end(&mut data)?;
    Ok(log_and_convert("stdin", &data))
}

/// Read the file at `path` into a word buffer; `-` is an ordinary name here.
pub fn read_file_words(path: &Path) -> Result<Vec<u32>, Box<dyn std::error::Error>> {
    let data = fs::read(path)?;
    Ok(log_and_convert(&path.display().to_string(), &data))
}

fn log_and_convert(source: &str, data: &[u8]) -> Vec<u32> {
    let ignored = data.len() % BLOCK_BYTES;
    if ignored != 0 {
        log::debug!("{source}: ignoring {ignored} trailing bytes (partial block)");
    }
    words_from_bytes(data)
}

/// Hex SHA-256 over the little-endian bytes of `words`.
pub fn checksum(words: &[u32]) -> String {
    let mut hasher = Sha256::new();
    for w in words {
        hasher.update(w.to_le_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Per-process scratch path under the system temp dir.
#[cfg(test)]
pub(crate) fn scratch_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("parfish_{}_{name}", std::process::id()))
}
