#![no_main]
use libfuzzer_sys::fuzz_target;
use parfish_crypto::rc5::Rc5Key;

fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }
    let rounds = data[0];
    let (block, key) = data[1..].split_at(8);
    let Ok(key) = Rc5Key::new(key, rounds) else {
        return;
    };

    let left = u32::from_le_bytes([block[0], block[1], block[2], block[3]]);
    let right = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let (a, b) = key.encrypt_words(left, right);
    assert_eq!(key.decrypt_words(a, b), (left, right));
});
