#![doc = "Block cipher engine library for parfish."]
#![forbid(unsafe_code)]

// Core traits
pub mod provider;

// Data-parallel driver
pub mod bulk;

// Symmetric ciphers
#[cfg(feature = "blowfish")]
pub mod blowfish;
#[cfg(feature = "rc5")]
pub mod rc5;

// Asymmetric demo
#[cfg(feature = "toy-rsa")]
pub mod toy_rsa;

