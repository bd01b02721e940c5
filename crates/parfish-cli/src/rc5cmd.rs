//! RC5-32 testbench: five chained known-answer rows, then a timed run.

use parfish_crypto::rc5::Rc5Key;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Key bytes taken from the key file.
const KEY_SIZE: usize = 32;

/// Chained rows printed before the timed run.
const CHAIN_ROWS: usize = 5;

pub fn run(
    key_file: Option<&Path>,
    rounds: u8,
    iterations: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let key_bytes = load_key(key_file)?;
    let key = Rc5Key::new(&key_bytes, rounds)?;
    println!("RC5-32/{rounds}/{KEY_SIZE} examples:");

    let rows = chained_rows(&key, CHAIN_ROWS)?;
    for ((p0, p1), (c0, c1)) in &rows {
        println!("plaintext {p0:08X} {p1:08X}  --->  ciphertext {c0:08X} {c1:08X}");
    }

    let seed = rows.last().map(|&(_, ct)| ct).unwrap_or_default();
    let start = Instant::now();
    let last = chain_encrypt(&key, seed, iterations);
    let elapsed = start.elapsed().as_secs_f64();
    log::debug!("final block {:08X} {:08X}", last.0, last.1);
    println!("Time taken for {iterations} blocks: {elapsed:.6}s");
    Ok(())
}

/// First `KEY_SIZE` bytes of the key file, zero padded; all zeros without one.
fn load_key(key_file: Option<&Path>) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut key = vec![0u8; KEY_SIZE];
    if let Some(path) = key_file {
        let data = fs::read(path)?;
        let n = data.len().min(KEY_SIZE);
        key[..n].copy_from_slice(&data[..n]);
        if data.len() < KEY_SIZE {
            log::debug!("{}: key padded from {n} to {KEY_SIZE} bytes", path.display());
        }
    }
    Ok(key)
}

type Block = (u32, u32);

/// Starting from the zero block, encrypt each ciphertext as the next
/// plaintext; every row is checked by decryption.
fn chained_rows(key: &Rc5Key, count: usize) -> Result<Vec<(Block, Block)>, Box<dyn std::error::Error>> {
    let mut rows = Vec::with_capacity(count);
    let mut ct: Block = (0, 0);
    for _ in 0..count {
        let pt = ct;
        ct = key.encrypt_words(pt.0, pt.1);
        if key.decrypt_words(ct.0, ct.1) != pt {
            return Err(format!("decryption error at plaintext {:08X} {:08X}", pt.0, pt.1).into());
        }
        rows.push((pt, ct));
    }
    Ok(rows)
}

fn chain_encrypt(key: &Rc5Key, mut block: Block, iterations: u64) -> Block {
    for _ in 0..iterations {
        block = key.encrypt_words(block.0, block.1);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chained_rows_link() {
        let key = Rc5Key::new(&[0u8; 16], 12).unwrap();
        let rows = chained_rows(&key, CHAIN_ROWS).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], ((0, 0), (0xeedba521, 0x6d8f4b15)));
        for pair in rows.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
        assert_eq!(chain_encrypt(&key, (0, 0), 5), rows[4].1);
    }

    #[test]
    fn test_load_key_from_file() {
        let path = crate::buffer::scratch_path("rc5_key.bin");
        let raw: Vec<u8> = (0..40).collect();
        fs::write(&path, &raw).unwrap();

        let key = load_key(Some(&path)).unwrap();
        assert_eq!(key, &raw[..32]);

        let key = Rc5Key::new(&key, 15).unwrap();
        assert_eq!(chained_rows(&key, 1).unwrap()[0].1, (0x9d4b915e, 0x47479ec6));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_key_padding() {
        let path = crate::buffer::scratch_path("rc5_short_key.txt");
        fs::write(&path, b"short").unwrap();
        let key = load_key(Some(&path)).unwrap();
        assert_eq!(&key[..5], b"short");
        assert!(key[5..].iter().all(|&b| b == 0));
        assert_eq!(load_key(None).unwrap(), vec![0u8; 32]);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_cli_rc5_run() {
        run(None, 15, 1000).unwrap();
        assert!(run(Some(Path::new("/nonexistent/parfish/key")), 12, 10).is_err());
    }
}
