#![no_main]
use libfuzzer_sys::fuzz_target;
use parfish_crypto::blowfish::BlowfishEngine;
use parfish_types::CryptoError;

// First byte picks the key length, the rest is key then buffer.
fuzz_target!(|data: &[u8]| {
    let Some((&len, rest)) = data.split_first() else {
        return;
    };
    let key_len = (len as usize % 57).min(rest.len());
    let (key, payload) = rest.split_at(key_len);

    let mut engine = BlowfishEngine::new();
    if let Err(e) = engine.init(key) {
        assert!(key.is_empty());
        assert!(matches!(e, CryptoError::InvalidKeyLength { got: 0, .. }));
        return;
    }

    let original: Vec<u32> = payload
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let mut buffer = original.clone();
    if let Err(e) = engine.encrypt(&mut buffer) {
        assert_eq!(
            e,
            CryptoError::InvalidBufferLength {
                words: original.len()
            }
        );
        assert_eq!(original.len() % 2, 1);
        assert_eq!(buffer, original);
        return;
    }
    engine.decrypt(&mut buffer).unwrap();
    assert_eq!(buffer, original);
});
