//! Blowfish file encryption with round-trip verification.
//!
//! Writes `<stem>.enc`, `<stem>.enc.sha256` and `<stem>.dec`.

use crate::buffer;
use parfish_crypto::blowfish::BlowfishEngine;
use parfish_crypto::bulk::{BulkProcessor, BulkReport};
use parfish_types::CipherDirection;
use std::fs;
use std::path::{Path, PathBuf};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub fn run(
    input: &Path,
    output_dir: Option<&Path>,
    key: &str,
    threads: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let artifacts = encrypt_file(input, output_dir, key, threads)?;
    log::info!("Wrote {}", artifacts.encrypted.display());
    log::info!("Wrote {}", artifacts.checksum.display());
    log::info!("Wrote {}", artifacts.decrypted.display());
    Ok(())
}

/// Paths of the files written by one `enc` run.
#[derive(Debug)]
struct Artifacts {
    encrypted: PathBuf,
    checksum: PathBuf,
    decrypted: PathBuf,
}

fn encrypt_file(
    input: &Path,
    output_dir: Option<&Path>,
    key: &str,
    threads: Option<usize>,
) -> Result<Artifacts, Box<dyn std::error::Error>> {
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("input path has no file name: {}", input.display()))?;
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    let out = |ext: &str| {
        let mut name = stem.to_os_string();
        name.push(ext);
        dir.join(name)
    };

    let mut words = buffer::read_file_words(input)?;
    let original = buffer::checksum(&words);
    println!("Original checksum:  {original}");

    let processor = match threads {
        Some(n) => BulkProcessor::with_threads(n)?,
        None => BulkProcessor::new(),
    };
    log::info!(
        "Encrypting {} ({} blocks, {} threads)",
        input.display(),
        words.len() / 2,
        processor.num_threads()
    );

    let mut engine = BlowfishEngine::with_processor(processor);
    engine.init(key.as_bytes())?;

    let direction = CipherDirection::Encrypt;
    let report = engine.process(&mut words, direction)?;
    print_report(direction, &report);

    let encrypted = buffer::checksum(&words);
    println!("Encrypted checksum: {encrypted}");

    let artifacts = Artifacts {
        encrypted: out(".enc"),
        checksum: out(".enc.sha256"),
        decrypted: out(".dec"),
    };
    fs::write(&artifacts.encrypted, buffer::words_to_bytes(&words))?;
    fs::write(&artifacts.checksum, format!("{encrypted}\n"))?;

    let report = engine.process(&mut words, direction.inverse())?;
    print_report(direction.inverse(), &report);
    engine.cleanup()?;

    fs::write(&artifacts.decrypted, buffer::words_to_bytes(&words))?;

    let decrypted = buffer::checksum(&words);
    if decrypted != original {
        return Err(format!("round trip failed: decrypted checksum {decrypted} != {original}").into());
    }
    println!("Round trip verified");

    Ok(artifacts)
}

fn print_report(direction: CipherDirection, report: &BulkReport) {
    let millis = report.elapsed().as_secs_f64() * 1000.0;
    let mb_per_sec = report.bytes_per_sec() / BYTES_PER_MB;
    println!(
        "{direction:8} {} bytes in {millis:.3} ms  ({mb_per_sec:.2} MB/s)",
        report.bytes()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use parfish_crypto::blowfish::BlowfishKey;
    use parfish_crypto::bulk::process_buffer;
    use parfish_types::CryptoError;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = buffer::scratch_path(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_cli_enc_writes_artifacts() {
        let dir = scratch_dir("enc_artifacts");
        let input = dir.join("message.txt");
        let plaintext = b"The quick brown fox jumps over the lazy dog!!";
        fs::write(&input, plaintext).unwrap();

        let artifacts = encrypt_file(&input, None, "TESTKEY", Some(2)).unwrap();
        assert_eq!(artifacts.encrypted, dir.join("message.enc"));
        assert_eq!(artifacts.checksum, dir.join("message.enc.sha256"));
        assert_eq!(artifacts.decrypted, dir.join("message.dec"));

        // 45 bytes -> five whole blocks.
        let decrypted = fs::read(&artifacts.decrypted).unwrap();
        assert_eq!(decrypted, &plaintext[..40]);

        let ciphertext = fs::read(&artifacts.encrypted).unwrap();
        assert_eq!(ciphertext.len(), 40);
        assert_ne!(ciphertext, decrypted);

        // The ciphertext file matches an independent encryption of the words.
        let mut words = buffer::words_from_bytes(plaintext);
        let key = BlowfishKey::new(b"TESTKEY").unwrap();
        process_buffer(&key, &mut words, CipherDirection::Encrypt).unwrap();
        assert_eq!(buffer::words_to_bytes(&words), ciphertext);

        let recorded = fs::read_to_string(&artifacts.checksum).unwrap();
        assert_eq!(recorded.trim(), buffer::checksum(&words));

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cli_enc_output_dir() {
        let src = scratch_dir("enc_src");
        let dst = scratch_dir("enc_dst");
        let input = src.join("data.bin");
        fs::write(&input, [0xA5u8; 64]).unwrap();

        run(&input, Some(&dst), "another key", None).unwrap();
        assert!(dst.join("data.enc").exists());
        assert!(dst.join("data.enc.sha256").exists());
        assert_eq!(fs::read(dst.join("data.dec")).unwrap(), [0xA5u8; 64]);

        fs::remove_dir_all(&src).ok();
        fs::remove_dir_all(&dst).ok();
    }

    #[test]
    fn test_cli_enc_invalid_key() {
        let dir = scratch_dir("enc_badkey");
        let input = dir.join("k.txt");
        fs::write(&input, b"12345678").unwrap();

        let err = encrypt_file(&input, None, "", None).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CryptoError>(),
            Some(&CryptoError::InvalidKeyLength {
                min: 1,
                max: 56,
                got: 0
            })
        );
        let long_key = "k".repeat(57);
        assert!(encrypt_file(&input, None, &long_key, None).is_err());
        assert!(!dir.join("k.enc").exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cli_enc_dash_input_is_a_path() {
        let dir = scratch_dir("enc_dash");
        let input = dir.join("-");
        fs::write(&input, [0x3Cu8; 16]).unwrap();

        let artifacts = encrypt_file(&input, None, "TESTKEY", None).unwrap();
        assert_eq!(artifacts.encrypted, dir.join("-.enc"));
        assert_eq!(fs::read(dir.join("-.dec")).unwrap(), [0x3Cu8; 16]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_cli_enc_missing_input() {
        assert!(run(Path::new("/nonexistent/parfish/in.txt"), None, "TESTKEY", None).is_err());
    }
}
