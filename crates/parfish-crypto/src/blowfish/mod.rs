//! Blowfish block cipher implementation.
//!
//! Blowfish (Schneier, 1993) is a 16-round Feistel network on 64-bit blocks
//! with a variable-length key of 1 to 56 bytes. The key schedule replaces
//! the pi-derived subkeys and S-boxes with key-dependent values; after that
//! the schedule is read-only and may be shared freely between threads.
//!
//! Byte-level helpers use big-endian words, matching the published ECB test
//! vectors. For whole-buffer processing see [`crate::bulk`] and
//! [`BlowfishEngine`].

mod consts;
mod engine;

pub use engine::{BlowfishEngine, EngineState};

use crate::provider::{BlockCipher, WordOrder};
use consts::{NUM_SUBKEYS, P_INIT, S_INIT};
use parfish_types::CryptoError;
use std::fmt;
use std::mem;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Blowfish block size in bytes (64 bits).
pub const BLOWFISH_BLOCK_SIZE: usize = 8;

/// Shortest accepted key in bytes.
pub const BLOWFISH_MIN_KEY_SIZE: usize = 1;

/// Longest accepted key in bytes (448 bits).
pub const BLOWFISH_MAX_KEY_SIZE: usize = 56;

const ROUNDS: usize = 16;

/// A Blowfish key schedule: 18 subkeys and four 256-entry S-boxes.
///
/// A value of this type is always fully derived; there is no way to observe
/// a partially built schedule.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct BlowfishKey {
    p: [u32; NUM_SUBKEYS],
    s: [[u32; 256]; 4],
    key_len: usize,
}

impl BlowfishKey {
    /// Derive the key schedule from a 1..=56 byte key.
    ///
    /// The derivation is inherently sequential: every step encrypts with the
    /// tables produced by the previous steps.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() < BLOWFISH_MIN_KEY_SIZE || key.len() > BLOWFISH_MAX_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                min: BLOWFISH_MIN_KEY_SIZE,
                max: BLOWFISH_MAX_KEY_SIZE,
                got: key.len(),
            });
        }

        let mut ctx = BlowfishKey {
            p: P_INIT,
            s: S_INIT,
            key_len: key.len(),
        };

        // Mix the key into the subkeys, cycling through the key bytes.
        let mut key_bytes = key.iter().copied().cycle();
        for subkey in ctx.p.iter_mut() {
            let chunk = (&mut key_bytes)
                .take(4)
                .fold(0u32, |acc, b| (acc << 8) | u32::from(b));
            *subkey ^= chunk;
        }

        let (mut left, mut right) = (0u32, 0u32);
        for i in (0..NUM_SUBKEYS).step_by(2) {
            (left, right) = ctx.encrypt_words(left, right);
            ctx.p[i] = left;
            ctx.p[i + 1] = right;
        }
        for sbox in 0..4 {
            for i in (0..256).step_by(2) {
                (left, right) = ctx.encrypt_words(left, right);
                ctx.s[sbox][i] = left;
                ctx.s[sbox][i + 1] = right;
            }
        }

        Ok(ctx)
    }

    /// Round function F.
    #[inline(always)]
    fn f(&self, x: u32) -> u32 {
        let [a, b, c, d] = x.to_be_bytes();
        (self.s[0][a as usize].wrapping_add(self.s[1][b as usize]) ^ self.s[2][c as usize])
            .wrapping_add(self.s[3][d as usize])
    }

    /// Encrypt one block given as two words.
    #[inline]
    pub fn encrypt_words(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for &subkey in &self.p[..ROUNDS] {
            left ^= subkey;
            right ^= self.f(left);
            mem::swap(&mut left, &mut right);
        }
        mem::swap(&mut left, &mut right);
        right ^= self.p[ROUNDS];
        left ^= self.p[ROUNDS + 1];
        (left, right)
    }

    /// Decrypt one block given as two words; exact inverse of
    /// [`encrypt_words`](Self::encrypt_words).
    #[inline]
    pub fn decrypt_words(&self, mut left: u32, mut right: u32) -> (u32, u32) {
        for &subkey in self.p[2..].iter().rev() {
            left ^= subkey;
            right ^= self.f(left);
            mem::swap(&mut left, &mut right);
        }
        mem::swap(&mut left, &mut right);
        right ^= self.p[1];
        left ^= self.p[0];
        (left, right)
    }
}

impl BlockCipher for BlowfishKey {
    fn key_size(&self) -> usize {
        self.key_len
    }

    fn word_order(&self) -> WordOrder {
        WordOrder::BigEndian
    }

    fn encrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
        BlowfishKey::encrypt_words(self, left, right)
    }

    fn decrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
        BlowfishKey::decrypt_words(self, left, right)
    }
}

impl fmt::Debug for BlowfishKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlowfishKey")
            .field("key_len", &self.key_len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    #[test]
    fn test_initial_tables_are_pi() {
        assert_eq!(P_INIT[0], 0x243f6a88);
        assert_eq!(P_INIT[17], 0x8979fb1b);
        assert_eq!(S_INIT[0][0], 0xd1310ba6);
        assert_eq!(S_INIT[3][255], 0x3ac372e6);
    }

    // Eric Young's ECB vectors.
    #[test]
    fn test_zero_key_zero_block() {
        let key = BlowfishKey::new(&[0u8; 8]).unwrap();
        assert_eq!(key.encrypt_words(0, 0), (0x4ef99745, 0x6198dd78));
    }

    #[test]
    fn test_ecb_vector_bytes() {
        let key = BlowfishKey::new(&hex_to_bytes("fedcba9876543210")).unwrap();
        let mut block = hex_to_bytes("0123456789abcdef");
        key.encrypt_block(&mut block).unwrap();
        assert_eq!(hex(&block), "0aceab0fc6a0a28d");
        key.decrypt_block(&mut block).unwrap();
        assert_eq!(hex(&block), "0123456789abcdef");
    }

    #[test]
    fn test_sixteen_byte_key_vector() {
        let key = BlowfishKey::new(&hex_to_bytes("00112233445566778899aabbccddeeff")).unwrap();
        let (l, r) = key.encrypt_words(0x6518a1f5, 0xc8d9b63c);
        assert_eq!((l, r), (0xdac63686, 0x1d70bd8a));
        assert_eq!(key.decrypt_words(l, r), (0x6518a1f5, 0xc8d9b63c));
    }

    #[test]
    fn test_ascii_key_reference_block() {
        let key = BlowfishKey::new(b"TESTKEY").unwrap();
        assert_eq!(key.encrypt_words(0, 0), (0x11d33704, 0x9796d478));
        assert_eq!(key.encrypt_words(0x01234567, 0x89abcdef), (0xade94dac, 0xcd1481ab));
    }

    #[test]
    fn test_key_length_bounds() {
        assert_eq!(
            BlowfishKey::new(&[]).unwrap_err(),
            CryptoError::InvalidKeyLength {
                min: 1,
                max: 56,
                got: 0
            }
        );
        assert_eq!(
            BlowfishKey::new(&[0x4b; 57]).unwrap_err(),
            CryptoError::InvalidKeyLength {
                min: 1,
                max: 56,
                got: 57
            }
        );

        let short = BlowfishKey::new(b"k").unwrap();
        assert_eq!(short.encrypt_words(0, 0), (0xed224443, 0x31321c1b));
        assert_eq!(short.key_size(), 1);
        assert_eq!(short.block_size(), BLOWFISH_BLOCK_SIZE);

        let long = BlowfishKey::new(&[0x4b; 56]).unwrap();
        assert_eq!(long.encrypt_words(0, 0), (0x7066ae95, 0x4e06cb9c));
        assert_eq!(long.key_size(), 56);
    }

    #[test]
    fn test_roundtrip_words() {
        let key = BlowfishKey::new(b"round trip key").unwrap();
        for (l, r) in [(0, 0), (u32::MAX, u32::MAX), (0xdeadbeef, 0xcafebabe), (1, 0)] {
            let (cl, cr) = key.encrypt_words(l, r);
            assert_ne!((cl, cr), (l, r));
            assert_eq!(key.decrypt_words(cl, cr), (l, r));
        }
    }

    #[test]
    fn test_clone_is_identical_schedule() {
        let key = BlowfishKey::new(b"clone").unwrap();
        let copy = key.clone();
        assert_eq!(key.encrypt_words(7, 9), copy.encrypt_words(7, 9));
    }

    #[test]
    fn test_debug_hides_tables() {
        let key = BlowfishKey::new(b"secret").unwrap();
        let s = format!("{key:?}");
        assert!(s.contains("key_len: 6"));
        assert!(!s.contains("0x"));
    }
}
