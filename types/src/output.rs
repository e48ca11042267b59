//! Protocol outputs: the published Merkle root and the final randomness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The 32-byte root of the Merkle tree built over locked `cv` commitments.
///
/// In the hybrid topology this is the only value the leader publishes
/// before the final batch.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleRoot([u8; 32]);

impl MerkleRoot {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for MerkleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MerkleRoot({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for MerkleRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// The final 32-byte random value `ω_o`, produced once per protocol run
/// when every participant's secret has been verified.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Randomness([u8; 32]);

impl Randomness {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Randomness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Randomness({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Randomness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randomness_display_is_full_hex() {
        let r = Randomness::new([0xFEu8; 32]);
        assert_eq!(r.to_string(), "fe".repeat(32));
    }

    #[test]
    fn merkle_root_bincode_roundtrip() {
        let root = MerkleRoot::new([3u8; 32]);
        let encoded = bincode::serialize(&root).unwrap();
        let decoded: MerkleRoot = bincode::deserialize(&encoded).unwrap();
        assert_eq!(root, decoded);
    }
}
