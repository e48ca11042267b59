//! Commitment-chain values: the secret `s` and the commitments `co`, `cv`.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 32-byte participant secret, the root of the commitment chain.
///
/// Generated once per protocol run from a CSPRNG and never reused. The
/// secret becomes public in REVEAL-2; until then it must stay with its
/// owner. `Debug` is redacted so a secret never reaches a log by accident;
/// the buffer is zeroized on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; 32]);

impl Secret {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret(..)")
    }
}

/// A 32-byte commitment: either `co = H(s)` or `cv = H(co)`.
///
/// Which link of the chain a value represents is positional (the field or
/// parameter it travels in), not encoded in the type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Byte-wise XOR with another commitment.
    ///
    /// The reveal-order algorithm uses XOR both to aggregate all locked
    /// commitments and as its distance metric. This is literal XOR, not
    /// arithmetic difference.
    pub fn xor(&self, other: &Commitment) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = self.0[i] ^ other.0[i];
        }
        out
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_debug_is_redacted() {
        let s = Secret::new([42u8; 32]);
        assert_eq!(format!("{:?}", s), "Secret(..)");
    }

    #[test]
    fn xor_is_bytewise() {
        let a = Commitment::new([0b1100u8; 32]);
        let b = Commitment::new([0b1010u8; 32]);
        assert_eq!(a.xor(&b), [0b0110u8; 32]);
    }

    #[test]
    fn xor_with_self_is_zero() {
        let c = Commitment::new([0x77u8; 32]);
        assert_eq!(c.xor(&c), [0u8; 32]);
    }

    #[test]
    fn commitment_bincode_roundtrip() {
        let c = Commitment::new([9u8; 32]);
        let encoded = bincode::serialize(&c).unwrap();
        let decoded: Commitment = bincode::deserialize(&encoded).unwrap();
        assert_eq!(c, decoded);
    }
}
