//! Lifecycle facade around a Blowfish key schedule.

use super::BlowfishKey;
use crate::bulk::{BulkProcessor, BulkReport};
use parfish_types::{CipherDirection, CryptoError};

/// Lifecycle state of a [`BlowfishEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
}

/// Owns at most one Blowfish key schedule and runs bulk passes with it.
///
/// `init` moves the engine to [`EngineState::Ready`]; `cleanup` drops the
/// schedule (zeroizing it) and returns to [`EngineState::Uninitialized`].
/// Processing while uninitialized fails with [`CryptoError::UseBeforeInit`].
///
/// ```
/// use parfish_crypto::blowfish::BlowfishEngine;
///
/// let mut engine = BlowfishEngine::new();
/// engine.init(b"TESTKEY").unwrap();
///
/// let mut buffer = vec![0u32, 1, 2, 3];
/// engine.encrypt(&mut buffer).unwrap();
/// engine.decrypt(&mut buffer).unwrap();
/// assert_eq!(buffer, [0, 1, 2, 3]);
///
/// engine.cleanup().unwrap();
/// assert!(engine.encrypt(&mut buffer).is_err());
/// ```
#[derive(Debug, Default)]
pub struct BlowfishEngine {
    key: Option<BlowfishKey>,
    processor: BulkProcessor,
}

impl BlowfishEngine {
    /// Create an uninitialized engine that runs on the global worker pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized engine that runs on `processor`.
    pub fn with_processor(processor: BulkProcessor) -> Self {
        BlowfishEngine {
            key: None,
            processor,
        }
    }

    /// Derive the key schedule and enter the `Ready` state.
    ///
    /// Any previous schedule is discarded first, so a failed `init` always
    /// leaves the engine uninitialized.
    pub fn init(&mut self, key: &[u8]) -> Result<(), CryptoError> {
        self.key = None;
        self.key = Some(BlowfishKey::new(key)?);
        Ok(())
    }

    /// Encrypt `buffer` in place, two words per block.
    pub fn encrypt(&self, buffer: &mut [u32]) -> Result<BulkReport, CryptoError> {
        self.process(buffer, CipherDirection::Encrypt)
    }

    /// Decrypt `buffer` in place, two words per block.
    pub fn decrypt(&self, buffer: &mut [u32]) -> Result<BulkReport, CryptoError> {
        self.process(buffer, CipherDirection::Decrypt)
    }

    /// Run one bulk pass in the given direction.
    pub fn process(
        &self,
        buffer: &mut [u32],
        direction: CipherDirection,
    ) -> Result<BulkReport, CryptoError> {
        let key = self.key()?;
        self.processor.process(key, buffer, direction)
    }

    /// Drop the key schedule and return to `Uninitialized`.
    pub fn cleanup(&mut self) -> Result<(), CryptoError> {
        match self.key.take() {
            Some(_) => Ok(()),
            None => Err(CryptoError::UseBeforeInit),
        }
    }

    /// The active key schedule.
    pub fn key(&self) -> Result<&BlowfishKey, CryptoError> {
        self.key.as_ref().ok_or(CryptoError::UseBeforeInit)
    }

    pub fn state(&self) -> EngineState {
        if self.key.is_some() {
            EngineState::Ready
        } else {
            EngineState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == EngineState::Ready
    }

    /// The bulk processor this engine dispatches to.
    pub fn processor(&self) -> &BulkProcessor {
        &self.processor
    }
}
