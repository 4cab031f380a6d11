//! SHA-256 digests used to reference transactions and derive identities

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Error, Result};

/// A 32-byte SHA-256 digest, serialized as lower-case hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecureHash([u8; 32]);

impl SecureHash {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn sha256(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        decode_32(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl TryFrom<String> for SecureHash {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<SecureHash> for String {
    fn from(hash: SecureHash) -> Self {
        hex::encode(hash.0)
    }
}

impl std::fmt::Display for SecureHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Decode exactly 32 bytes of hex
pub(crate) fn decode_32(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s).map_err(|e| Error::InvalidKey(format!("'{}': {}", s, e)))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| Error::InvalidKey(format!("expected 32 bytes, found {}", b.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let hash = SecureHash::sha256(b"abc");
        assert_eq!(
            hash.to_string(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hex_round_trip_through_serde() {
        let hash = SecureHash::sha256(b"iou");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json.len(), 64 + 2);
        let back: SecureHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn test_rejects_wrong_length_and_bad_hex() {
        assert!(SecureHash::from_hex("abcd").is_err());
        assert!(SecureHash::from_hex(&"zz".repeat(32)).is_err());
        assert!(SecureHash::from_hex(&"00".repeat(32)).is_ok());
    }
}
