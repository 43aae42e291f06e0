use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::validation::ValueError;

/// Hash functions an encoder can finalize with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlg {
    /// Keccak-256 with the pre-FIPS padding, as used by Ethereum.
    #[serde(rename = "keccak-256")]
    Keccak256,
}

/// Algorithm + digest, encoded as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// Digest algorithm (currently always `keccak-256`).
    pub alg: DigestAlg,
    /// Lowercase hex digest, 64 characters.
    pub hex: String,
}

fn digest_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9a-f]{64}$").expect("invalid regex"))
}

impl Digest {
    /// Constructs a validated digest.
    pub fn new(alg: DigestAlg, hex: impl Into<String>) -> Result<Self, ValueError> {
        let hex = hex.into();
        if !digest_pattern().is_match(&hex) {
            return Err(ValueError::InvalidHexString(hex));
        }
        Ok(Digest { alg, hex })
    }

    /// Digest bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        // validated on construction; fields are public, so fall back to empty
        ::hex::decode(&self.hex).unwrap_or_default()
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO: &str = "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8";

    #[test]
    fn digest_serializes_with_algorithm() {
        let digest = Digest::new(DigestAlg::Keccak256, HELLO).unwrap();
        assert_eq!(
            serde_json::to_string(&digest).unwrap(),
            format!(r#"{{"alg":"keccak-256","hex":"{}"}}"#, HELLO)
        );
        assert_eq!(digest.to_bytes().len(), 32);
        assert_eq!(digest.to_string(), HELLO);
    }

    #[test]
    fn digest_rejects_uppercase_and_short_hex() {
        assert!(Digest::new(DigestAlg::Keccak256, HELLO.to_uppercase()).is_err());
        assert!(Digest::new(DigestAlg::Keccak256, "abcd").is_err());
    }
}
