//! Trait-based provider mechanism for block ciphers.
//!
//! Every cipher in this crate works on a 64-bit block seen as a pair of
//! 32-bit words. The bulk driver in [`crate::bulk`] only needs the word-level
//! transform; the byte-level helpers exist for test vectors and file I/O.

use parfish_types::{CipherDirection, CryptoError};

/// Block size in bytes shared by every cipher in this crate.
pub const BLOCK_SIZE: usize = 8;

/// How the two words of a block are laid out in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOrder {
    BigEndian,
    LittleEndian,
}

impl WordOrder {
    fn load(self, bytes: [u8; 4]) -> u32 {
        match self {
            WordOrder::BigEndian => u32::from_be_bytes(bytes),
            WordOrder::LittleEndian => u32::from_le_bytes(bytes),
        }
    }

    fn store(self, word: u32) -> [u8; 4] {
        match self {
            WordOrder::BigEndian => word.to_be_bytes(),
            WordOrder::LittleEndian => word.to_le_bytes(),
        }
    }
}

/// A 64-bit block cipher with an immutable, fully derived key schedule.
///
/// Implementations are shared by reference across worker threads during a
/// bulk pass, so all transform methods take `&self`.
pub trait BlockCipher: Send + Sync {
    /// Length in bytes of the key this schedule was derived from.
    fn key_size(&self) -> usize;

    /// Byte order of the words inside an 8-byte block.
    fn word_order(&self) -> WordOrder;

    /// Encrypt one block given as `(left, right)`.
    fn encrypt_words(&self, left: u32, right: u32) -> (u32, u32);

    /// Decrypt one block given as `(left, right)`.
    fn decrypt_words(&self, left: u32, right: u32) -> (u32, u32);

    /// Block size in bytes.
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Apply the transform selected by `direction` to one block.
    #[inline]
    fn transform_words(&self, direction: CipherDirection, left: u32, right: u32) -> (u32, u32) {
        match direction {
            CipherDirection::Encrypt => self.encrypt_words(left, right),
            CipherDirection::Decrypt => self.decrypt_words(left, right),
        }
    }

    /// Encrypt a single 8-byte block in place.
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        transform_byte_block(self, CipherDirection::Encrypt, block)
    }

    /// Decrypt a single 8-byte block in place.
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        transform_byte_block(self, CipherDirection::Decrypt, block)
    }
}

fn transform_byte_block<C: BlockCipher + ?Sized>(
    cipher: &C,
    direction: CipherDirection,
    block: &mut [u8],
) -> Result<(), CryptoError> {
    if block.len() != BLOCK_SIZE {
        return Err(CryptoError::InvalidArg);
    }
    let order = cipher.word_order();
    let (lo, hi) = block.split_at_mut(4);
    let left = order.load([lo[0], lo[1], lo[2], lo[3]]);
    let right = order.load([hi[0], hi[1], hi[2], hi[3]]);

    let (left, right) = cipher.transform_words(direction, left, right);

    lo.copy_from_slice(&order.store(left));
    hi.copy_from_slice(&order.store(right));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Swaps and complements the halves; enough to exercise the plumbing.
    struct SwapCipher;

    impl BlockCipher for SwapCipher {
        fn key_size(&self) -> usize {
            0
        }

        fn word_order(&self) -> WordOrder {
            WordOrder::BigEndian
        }

        fn encrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
            (!right, left)
        }

        fn decrypt_words(&self, left: u32, right: u32) -> (u32, u32) {
            (right, !left)
        }
    }

    #[test]
    fn test_transform_words_dispatch() {
        let c = SwapCipher;
        let (l, r) = c.transform_words(CipherDirection::Encrypt, 1, 2);
        assert_eq!((l, r), (!2, 1));
        assert_eq!(c.transform_words(CipherDirection::Decrypt, l, r), (1, 2));
    }

    #[test]
    fn test_byte_block_big_endian_layout() {
        let c = SwapCipher;
        let mut block = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        c.encrypt_block(&mut block).unwrap();
        assert_eq!(block, [0xfa, 0xf9, 0xf8, 0xf7, 0x01, 0x02, 0x03, 0x04]);
        c.decrypt_block(&mut block).unwrap();
        assert_eq!(block, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn test_byte_block_wrong_length() {
        let c = SwapCipher;
        assert_eq!(c.encrypt_block(&mut [0u8; 7]), Err(CryptoError::InvalidArg));
        assert_eq!(c.decrypt_block(&mut [0u8; 16]), Err(CryptoError::InvalidArg));
        assert_eq!(c.block_size(), 8);
    }

    #[test]
    fn test_word_order_load_store() {
        let bytes = [0x11, 0x22, 0x33, 0x44];
        assert_eq!(WordOrder::BigEndian.load(bytes), 0x11223344);
        assert_eq!(WordOrder::LittleEndian.load(bytes), 0x44332211);
        assert_eq!(WordOrder::LittleEndian.store(0x44332211), bytes);
    }
}
