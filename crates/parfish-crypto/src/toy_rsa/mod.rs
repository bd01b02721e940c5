//! Textbook RSA over small primes.
//!
//! **Security warning**: the modulus fits in 32 bits and every message byte
//! is encrypted on its own with no padding. This exists to demonstrate
//! data-parallel modular exponentiation, not to protect anything.

use parfish_types::CryptoError;
use rayon::prelude::*;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Largest accepted prime factor (keeps `n` within `u32`).
pub const TOY_RSA_MAX_PRIME: u32 = u16::MAX as u32;

/// A toy RSA key pair.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ToyRsaKey {
    n: u32,
    phi: u32,
    e: u32,
    d: u32,
}

impl ToyRsaKey {
    /// Build a key pair from two distinct primes.
    ///
    /// `e` is the smallest exponent >= 2 coprime with phi(n); `d` is its
    /// inverse modulo phi(n). The modulus must exceed 255 so every byte
    /// value is encryptable.
    pub fn from_primes(p: u32, q: u32) -> Result<Self, CryptoError> {
        if p == q || p > TOY_RSA_MAX_PRIME || q > TOY_RSA_MAX_PRIME {
            return Err(CryptoError::InvalidArg);
        }
        if !is_prime(p) || !is_prime(q) {
            return Err(CryptoError::InvalidArg);
        }
        let n = p * q;
        if n <= u32::from(u8::MAX) {
            return Err(CryptoError::InvalidArg);
        }

        let phi = (p - 1) * (q - 1);
        let e = (2..phi)
            .find(|&e| gcd(e, phi) == 1)
            .ok_or(CryptoError::InvalidArg)?;
        let d = mod_inv(e, phi).ok_or(CryptoError::InvalidArg)?;

        Ok(ToyRsaKey { n, phi, e, d })
    }

    /// The classroom key pair: p = 157, q = 151.
    pub fn demo() -> Self {
        ToyRsaKey {
            n: 23707,
            phi: 23400,
            e: 7,
            d: 3343,
        }
    }

    pub fn modulus(&self) -> u32 {
        self.n
    }

    pub fn public_exponent(&self) -> u32 {
        self.e
    }

    pub fn private_exponent(&self) -> u32 {
        self.d
    }

    pub fn totient(&self) -> u32 {
        self.phi
    }

    /// Encrypt every byte of `message` independently, in parallel.
    pub fn encrypt(&self, message: &[u8]) -> Vec<u32> {
        message
            .par_iter()
            .map(|&m| mod_pow(u32::from(m), self.e, self.n))
            .collect()
    }

    /// Decrypt a ciphertext produced by [`encrypt`](Self::encrypt).
    ///
    /// Fails with [`CryptoError::InputOverflow`] if an element is not below
    /// the modulus or does not decrypt to a byte.
    pub fn decrypt(&self, ciphertext: &[u32]) -> Result<Vec<u8>, CryptoError> {
        ciphertext
            .par_iter()
            .map(|&c| {
                if c >= self.n {
                    return Err(CryptoError::InputOverflow);
                }
                u8::try_from(mod_pow(c, self.d, self.n)).map_err(|_| CryptoError::InputOverflow)
            })
            .collect()
    }
}

impl fmt::Debug for ToyRsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToyRsaKey")
            .field("n", &self.n)
            .field("e", &self.e)
            .finish_non_exhaustive()
    }
}

/// Square-and-multiply modular exponentiation.
fn mod_pow(base: u32, exp: u32, modulus: u32) -> u32 {
    let m = u64::from(modulus);
    let mut result = 1u64 % m;
    let mut base = u64::from(base) % m;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    result as u32
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Inverse of `a` modulo `m` by the extended Euclidean algorithm.
fn mod_inv(a: u32, m: u32) -> Option<u32> {
    let (mut old_r, mut r) = (i64::from(a), i64::from(m));
    let (mut old_s, mut s) = (1i64, 0i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    u32::try_from(old_s.rem_euclid(i64::from(m))).ok()
}

fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2u32;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}
