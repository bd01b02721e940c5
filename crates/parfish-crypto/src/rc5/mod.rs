//! RC5-32 block cipher (Rivest, 1994).
//!
//! Word size is fixed at 32 bits (64-bit block); the round count and key
//! length are parameters. Words are little-endian in the byte-level helpers,
//! as in the reference implementation.

use crate::provider::{BlockCipher, WordOrder};
use parfish_types::CryptoError;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// RC5 block size in bytes (two 32-bit words).
pub const RC5_BLOCK_SIZE: usize = 8;

/// Longest accepted key in bytes.
pub const RC5_MAX_KEY_SIZE: usize = 255;

/// Magic constant P32 = Odd((e - 2) * 2^32).
const P32: u32 = 0xb7e1_5163;

/// Magic constant Q32 = Odd((phi - 1) * 2^32).
const Q32: u32 = 0x9e37_79b9;

/// An expanded RC5-32/r/b key table.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Rc5Key {
    s: Vec<u32>,
    rounds: u8,
    key_len: usize,
}

impl Rc5Key {
    /// Round count of the nominal RC5-32/12/16 parameter set.
    pub const DEFAULT_ROUNDS: u8 = 12;

    /// Expand `key` (0..=255 bytes) for `rounds` rounds.
    pub fn new(key: &[u8], rounds: u8) -> Result<Self, CryptoError> {
        if key.len() > RC5_MAX_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                min: 0,
                max: RC5_MAX_KEY_SIZE,
                got: key.len(),
            });
        }

        let t = 2 * (rounds as usize + 1);
        let c = key.len().div_ceil(4).max(1);

        let mut l = vec![0u32; c];
        for (i, &b) in key.iter().enumerate() {
            l[i / 4] |= u32::from(b) << (8 * (i % 4));
        }

        let mut s = Vec::with_capacity(t);
        s.push(P32);
        for i in 1..t {
            s.push(s[i - 1].wrapping_add(Q32));
        }

        let (mut a, mut b) = (0u32, 0u32);
        let (mut i, mut j) = (0usize, 0usize);
        for _ in 0..3 * t.max(c) {
            s[i] = s[i].wrapping_add(a).wrapping_add(b).rotate_left(3);
            a = s[i];
            l[j] = l[j].wrapping_add(a).wrapping_add(b).rotate_left(a.wrapping_add(b));
            b = l[j];
            i = (i + 1) % t;
            j = (j + 1) % c;
        }
        l.zeroize();

        Ok(Rc5Key {
            s,
            rounds,
            key_len: key.len(),
        })
    }

    pub fn rounds(&self) -> u8 {
        self.rounds
    }

    /// Encrypt one block given as two words.
    pub fn encrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
        let s = &self.s;
        let mut a = left.wrapping_add(s[0]);
        let mut b = right.wrapping_add(s[1]);
        for i in 1..=self.rounds as usize {
            a = (a ^ b).rotate_left(b).wrapping_add(s[2 * i]);
            b = (b ^ a).rotate_left(a).wrapping_add(s[2 * i + 1]);
        }
        (a, b)
    }

    /// Decrypt one block given as two words.
    pub fn decrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
        let s = &self.s;
        let (mut a, mut b) = (left, right);
        for i in (1..=self.rounds as usize).rev() {
            b = b.wrapping_sub(s[2 * i + 1]).rotate_right(a) ^ a;
            a = a.wrapping_sub(s[2 * i]).rotate_right(b) ^ b;
        }
        (a.wrapping_sub(s[0]), b.wrapping_sub(s[1]))
    }
}

impl BlockCipher for Rc5Key {
    fn key_size(&self) -> usize {
        self.key_len
    }

    fn word_order(&self) -> WordOrder {
        WordOrder::LittleEndian
    }

    fn encrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
        Rc5Key::encrypt_words(self, left, right)
    }

    fn decrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
        Rc5Key::decrypt_words(self, left, right)
    }
}

impl fmt::Debug for Rc5Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rc5Key")
            .field("rounds", &self.rounds)
            .field("key_len", &self.key_len)
            .finish_non_exhaustive()
    }
}
