//! Parties and their signing keys
//!
//! The core never handles key material or signatures. A [`PublicKey`] here is
//! an identity the ledger framework has already checked a signature against.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::hash::decode_32;
use crate::{Error, Result};

/// A verified signer identity, serialized as lower-case hex.
///
/// `Ord` so signer sets can live in a `BTreeSet` with deterministic iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        decode_32(s).map(Self)
    }

    /// Deterministic identity derived from a seed (SHA-256 of the seed).
    ///
    /// For fixtures and tests: it carries no private key.
    pub fn derive(seed: &[u8]) -> Self {
        Self(Sha256::digest(seed).into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First eight hex characters, for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl TryFrom<String> for PublicKey {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        hex::encode(key.0)
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// A named legal identity and the key it signs with
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub owning_key: PublicKey,
}

impl Party {
    pub fn new(name: impl Into<String>, owning_key: PublicKey) -> Self {
        Self {
            name: name.into(),
            owning_key,
        }
    }

    /// A party whose key is derived from its name.
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let owning_key = PublicKey::derive(name.as_bytes());
        Self { name, owning_key }
    }

    /// Two parties are the same identity when they sign with the same key,
    /// whatever names they carry.
    pub fn same_identity(&self, other: &Party) -> bool {
        self.owning_key == other.owning_key
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.owning_key.short())
    }
}
