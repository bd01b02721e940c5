use std::fmt;
use std::str::FromStr;

/// Symmetric cipher algorithm identifiers (algorithm + mode combination).
///
/// Every cipher runs in raw independent-block mode: no IV, no chaining,
/// no padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherAlgId {
    /// Blowfish, 64-bit block, 1..=56 byte key.
    BlowfishEcb,
    /// RC5-32 with a configurable round count, 64-bit block.
    Rc5_32Ecb,
}

impl CipherAlgId {
    /// All identifiers, in the order the CLI lists them.
    pub const ALL: [CipherAlgId; 2] = [CipherAlgId::BlowfishEcb, CipherAlgId::Rc5_32Ecb];

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            CipherAlgId::BlowfishEcb => "blowfish",
            CipherAlgId::Rc5_32Ecb => "rc5",
        }
    }

    /// Block size in bytes.
    pub fn block_size(self) -> usize {
        8
    }
}

impl fmt::Display for CipherAlgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CipherAlgId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "blowfish" | "bf" | "blowfish-ecb" => Ok(CipherAlgId::BlowfishEcb),
            "rc5" | "rc5-32" | "rc5-ecb" => Ok(CipherAlgId::Rc5_32Ecb),
            _ => Err(format!("unknown cipher: {s} (supported: blowfish, rc5)")),
        }
    }
}

/// Direction of a cipher pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CipherDirection {
    #[default]
    Encrypt,
    Decrypt,
}

impl CipherDirection {
    /// The opposite direction.
    pub fn inverse(self) -> Self {
        match self {
            CipherDirection::Encrypt => CipherDirection::Decrypt,
            CipherDirection::Decrypt => CipherDirection::Encrypt,
        }
    }
}

impl fmt::Display for CipherDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherDirection::Encrypt => f.pad("encrypt"),
            CipherDirection::Decrypt => f.pad("decrypt"),
        }
    }
}
