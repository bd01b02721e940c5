/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("invalid argument")]
    InvalidArg,
    #[error("input data too long")]
    InputOverflow,

    // Symmetric cipher errors
    #[error("invalid key length: expected {min}..={max} bytes, got {got}")]
    InvalidKeyLength { min: usize, max: usize, got: usize },
    #[error("invalid buffer length: {words} words is not a whole number of blocks")]
    InvalidBufferLength { words: usize },
    #[error("cipher engine used before init")]
    UseBeforeInit,

    // Bulk processing errors
    #[error("worker pool: {0}")]
    WorkerPool(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_key_length() {
        let err = CryptoError::InvalidKeyLength {
            min: 1,
            max: 56,
            got: 57,
        };
        assert_eq!(
            err.to_string(),
            "invalid key length: expected 1..=56 bytes, got 57"
        );
    }

    #[test]
    fn test_display_invalid_buffer_length() {
        let err = CryptoError::InvalidBufferLength { words: 3 };
        assert_eq!(
            err.to_string(),
            "invalid buffer length: 3 words is not a whole number of blocks"
        );
    }

    #[test]
    fn test_display_use_before_init() {
        assert_eq!(
            CryptoError::UseBeforeInit.to_string(),
            "cipher engine used before init"
        );
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(CryptoError::InvalidArg, CryptoError::InvalidArg);
        assert_ne!(CryptoError::InvalidArg, CryptoError::InputOverflow);
    }
}
