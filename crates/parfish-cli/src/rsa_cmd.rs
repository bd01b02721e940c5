//! Toy RSA demo: per-byte textbook RSA over small primes.

use parfish_crypto::toy_rsa::ToyRsaKey;
use std::fs;
use std::path::Path;
use std::time::Instant;

const DEFAULT_MESSAGE: &[u8] = b"Hello from the parallel RSA demo!";

pub fn run(
    input: Option<&Path>,
    p: Option<u32>,
    q: Option<u32>,
) -> Result<(), Box<dyn std::error::Error>> {
    let key = match (p, q) {
        (Some(p), Some(q)) => ToyRsaKey::from_primes(p, q)?,
        (None, None) => ToyRsaKey::demo(),
        _ => return Err("both --p and --q are required for a custom key".into()),
    };
    let message = match input {
        Some(path) => fs::read(path)?,
        None => DEFAULT_MESSAGE.to_vec(),
    };

    println!("Modulus:     {}", key.modulus());
    println!("Public key:  {}", key.public_exponent());
    println!("Private key: {}", key.private_exponent());

    let start = Instant::now();
    let decrypted = roundtrip(&key, &message)?;
    let elapsed = start.elapsed().as_secs_f64();

    if decrypted != message {
        return Err("round trip failed: decrypted message differs".into());
    }
    println!("Round trip of {} bytes verified in {elapsed:.6}s", message.len());
    Ok(())
}

fn roundtrip(key: &ToyRsaKey, message: &[u8]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let encrypted = key.encrypt(message);
    log::debug!("encrypted: {encrypted:?}");
    let decrypted = key.decrypt(&encrypted)?;
    log::debug!("decrypted: {}", String::from_utf8_lossy(&decrypted));
    Ok(decrypted)
}
